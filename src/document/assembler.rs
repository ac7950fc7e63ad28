//! Document Assembler
//!
//! Renders templates independently and concatenates their pages.

use std::sync::Arc;

use crate::report::Report;

use super::renderer::{
    report_template, EMPLOYMENT_AGREEMENT, PAYMENT_ACKNOWLEDGMENT, WAGE_CLAIM,
};
use super::{
    BuiltinTemplates, Document, DocumentError, DocumentRenderer, PacketContext, TemplateContext,
    TemplateRenderer, TextPaginator,
};

/// Forms of an employee packet, in output order
pub const PACKET_TEMPLATES: [&str; 3] = [EMPLOYMENT_AGREEMENT, WAGE_CLAIM, PAYMENT_ACKNOWLEDGMENT];

/// A finished PDF and the name it is served under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledDocument {
    pub filename: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

/// Assembles packets and report exports
#[derive(Clone)]
pub struct DocumentAssembler {
    templates: Arc<dyn TemplateRenderer>,
    paginator: Arc<dyn DocumentRenderer>,
}

impl DocumentAssembler {
    pub fn new(templates: Arc<dyn TemplateRenderer>, paginator: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            templates,
            paginator,
        }
    }

    /// Built-in text templates with the default page budget
    pub fn builtin() -> Self {
        Self::new(Arc::new(BuiltinTemplates), Arc::new(TextPaginator::default()))
    }

    fn render_document(
        &self,
        template: &str,
        context: &TemplateContext<'_>,
    ) -> Result<Document, DocumentError> {
        let markup = self.templates.render(template, context)?;
        self.paginator.to_document(&markup)
    }

    // =========================================================================
    // Employee packet
    // =========================================================================

    /// Render every packet form on its own, then concatenate the pages
    pub fn employee_packet(&self, context: PacketContext<'_>) -> Result<AssembledDocument, DocumentError> {
        let template_context = TemplateContext::Packet(context);

        let mut packet = Document::default();
        for template in PACKET_TEMPLATES {
            let document = self.render_document(template, &template_context)?;
            tracing::debug!(template, pages = document.page_count(), "Form rendered");
            packet.append(document);
        }

        let filename = format!(
            "{}_{}_{}.pdf",
            context.employee.surname,
            context.employee.name,
            context.event.date.format("%Y%m%d")
        );

        Ok(AssembledDocument {
            filename,
            page_count: packet.page_count(),
            bytes: packet.to_pdf_bytes()?,
        })
    }

    // =========================================================================
    // Report export
    // =========================================================================

    /// Render a report with the template of its dimension
    pub fn report_export(&self, report: &Report) -> Result<AssembledDocument, DocumentError> {
        let document = self.render_document(
            report_template(report.dimension),
            &TemplateContext::Report(report),
        )?;

        Ok(AssembledDocument {
            filename: format!("{}{}.pdf", report.month, report.dimension.file_suffix()),
            page_count: document.page_count(),
            bytes: document.to_pdf_bytes()?,
        })
    }
}
