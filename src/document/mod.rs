//! Document module
//!
//! Paginated documents, the template/pagination seams that produce them,
//! and the assembler that stitches rendered templates into one PDF.

pub mod assembler;
pub mod pdf;
pub mod renderer;

pub use assembler::{AssembledDocument, DocumentAssembler, PACKET_TEMPLATES};
pub use renderer::{
    BuiltinTemplates, DocumentRenderer, PacketContext, TemplateContext, TemplateRenderer,
    TextPaginator,
};

/// Errors that can occur while rendering or writing documents
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Template {template} cannot render this context")]
    ContextMismatch { template: String },

    #[error("PDF error: {0}")]
    Pdf(String),
}

/// One page of text lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
}

impl Page {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

/// An ordered sequence of pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Move all pages of `other` to the end of this document
    pub fn append(&mut self, other: Document) {
        self.pages.extend(other.pages);
    }

    pub fn to_pdf_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        pdf::write_pdf(&self.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str) -> Page {
        Page::new(vec![text.to_string()])
    }

    #[test]
    fn test_append_keeps_page_order() {
        let mut first = Document::new(vec![page("a1"), page("a2")]);
        let second = Document::new(vec![page("b1")]);

        first.append(second);

        assert_eq!(first.page_count(), 3);
        assert_eq!(first.pages[2], page("b1"));
    }
}
