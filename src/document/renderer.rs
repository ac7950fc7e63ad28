//! Template and pagination seams
//!
//! `TemplateRenderer` turns a named template plus data into markup;
//! `DocumentRenderer` turns markup into pages. The built-in pair renders
//! plain text where a form feed (`\f`) starts a new page.

use crate::domain::{Employee, EmployerInfo, EventRow};
use crate::report::{Report, ReportDimension};

use super::{Document, DocumentError, Page};

pub const EMPLOYMENT_AGREEMENT: &str = "forms/employment_agreement";
pub const WAGE_CLAIM: &str = "forms/wage_claim";
pub const PAYMENT_ACKNOWLEDGMENT: &str = "forms/payment_acknowledgment";

/// Explicit page break in markup
pub const PAGE_BREAK: char = '\u{0C}';

/// Template that exports a report of the given dimension
pub fn report_template(dimension: ReportDimension) -> &'static str {
    match dimension {
        ReportDimension::ByDate => "reports/by_date",
        ReportDimension::ByEmployee => "reports/by_employee",
        ReportDimension::ByEvent => "reports/by_event",
    }
}

/// Data of one employee's packet
#[derive(Debug, Clone, Copy)]
pub struct PacketContext<'a> {
    pub employee: &'a Employee,
    pub event: &'a EventRow,
    pub employer: &'a EmployerInfo,
}

/// Data handed to a template
#[derive(Debug, Clone, Copy)]
pub enum TemplateContext<'a> {
    Packet(PacketContext<'a>),
    Report(&'a Report),
}

/// render(template, context) -> markup
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &TemplateContext<'_>) -> Result<String, DocumentError>;
}

/// markup -> paginated document
pub trait DocumentRenderer: Send + Sync {
    fn to_document(&self, markup: &str) -> Result<Document, DocumentError>;
}

// =========================================================================
// BuiltinTemplates
// =========================================================================

/// Plain-text versions of the packet forms and report layouts
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateRenderer for BuiltinTemplates {
    fn render(&self, template: &str, context: &TemplateContext<'_>) -> Result<String, DocumentError> {
        let mismatch = || DocumentError::ContextMismatch {
            template: template.to_string(),
        };

        match template {
            EMPLOYMENT_AGREEMENT | WAGE_CLAIM | PAYMENT_ACKNOWLEDGMENT => match context {
                TemplateContext::Packet(packet) => Ok(render_form(template, packet)),
                TemplateContext::Report(_) => Err(mismatch()),
            },
            "reports/by_date" | "reports/by_employee" | "reports/by_event" => match context {
                TemplateContext::Report(report) => Ok(render_report(report)),
                TemplateContext::Packet(_) => Err(mismatch()),
            },
            other => Err(DocumentError::UnknownTemplate(other.to_string())),
        }
    }
}

fn party_block(out: &mut Vec<String>, packet: &PacketContext<'_>) {
    let PacketContext { employee, employer, .. } = packet;
    out.push(format!("Employer:   {}", employer.name));
    out.push(format!("Address:    {}", employer.address));
    out.push(format!("Contact:    {}", employer.contact));
    out.push(String::new());
    out.push(format!("Employee:   {} {}", employee.name, employee.surname));
    out.push(format!("ID Number:  {}", employee.id));
    out.push(format!("Contact:    {}", employee.contact));
    out.push(String::new());
}

fn signature_block(out: &mut Vec<String>, first: &str, second: &str) {
    out.push(String::new());
    out.push(format!("{:<12} ______________________________", first));
    out.push(String::new());
    out.push(format!("{:<12} ______________________________", second));
    out.push(String::new());
    out.push("Date:        ______________________________".to_string());
}

fn render_form(template: &str, packet: &PacketContext<'_>) -> String {
    let PacketContext { employee, event, employer } = packet;
    let full_name = format!("{} {}", employee.name, employee.surname);
    let mut out = Vec::new();

    match template {
        EMPLOYMENT_AGREEMENT => {
            out.push("EMPLOYMENT AGREEMENT".to_string());
            out.push("====================".to_string());
            out.push(String::new());
            party_block(&mut out, packet);
            out.push(format!(
                "{} engages {} as a casual worker for the event",
                employer.name, full_name
            ));
            out.push(format!("\"{}\" held on {}.", event.event_name, event.date));
            out.push(format!("The agreed amount payable for this event is {}.", event.amount_payable));
            out.push("The engagement ends when the event ends.".to_string());
            signature_block(&mut out, "Employer:", "Employee:");
        }
        WAGE_CLAIM => {
            out.push("WAGE CLAIM".to_string());
            out.push("==========".to_string());
            out.push(String::new());
            party_block(&mut out, packet);
            out.push(format!("{:<16} {}", "Event:", event.event_name));
            out.push(format!("{:<16} {}", "Date worked:", event.date));
            out.push(format!("{:<16} {}", "Amount claimed:", event.amount_payable));
            out.push(String::new());
            out.push(format!(
                "I, {}, claim the amount above for work performed.",
                full_name
            ));
            signature_block(&mut out, "Claimant:", "Approved by:");
        }
        _ => {
            out.push("PAYMENT ACKNOWLEDGMENT".to_string());
            out.push("======================".to_string());
            out.push(String::new());
            party_block(&mut out, packet);
            out.push(format!(
                "I, {}, acknowledge receipt of {} from {}",
                full_name, event.amount_payable, employer.name
            ));
            out.push(format!("for \"{}\" on {}.", event.event_name, event.date));
            signature_block(&mut out, "Recipient:", "Paid by:");
        }
    }

    out.join("\n")
}

fn report_title(dimension: ReportDimension) -> &'static str {
    match dimension {
        ReportDimension::ByDate => "EVENT REPORT BY DATE",
        ReportDimension::ByEmployee => "EVENT REPORT BY EMPLOYEE",
        ReportDimension::ByEvent => "EVENT REPORT BY EVENT",
    }
}

fn render_report(report: &Report) -> String {
    let mut out = vec![
        format!("{} - {}", report_title(report.dimension), report.month),
        String::new(),
        format!(
            "{:<10}  {:<22}  {:<24}  {:<13}  {:>10}",
            "Date", "Event", "Employee", "ID Number", "Amount"
        ),
        "-".repeat(87),
    ];

    if report.rows.is_empty() {
        out.push("No events recorded.".to_string());
    }
    for row in &report.rows {
        let date = row
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push(format!(
            "{:<10}  {:<22}  {:<24}  {:<13}  {:>10}",
            date,
            truncate(&row.event_name, 22),
            truncate(&format!("{}, {}", row.surname, row.name), 24),
            row.employee_id,
            row.amount_payable.to_string()
        ));
    }

    out.push("-".repeat(87));
    out.push(format!("{:<75}  {:>10}", "Total", report.total.to_string()));
    out.join("\n")
}

fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

// =========================================================================
// TextPaginator
// =========================================================================

/// Splits text markup into pages at form feeds and every `lines_per_page`
#[derive(Debug, Clone, Copy)]
pub struct TextPaginator {
    lines_per_page: usize,
}

impl TextPaginator {
    pub const DEFAULT_LINES_PER_PAGE: usize = 60;

    pub fn new(lines_per_page: usize) -> Self {
        Self {
            lines_per_page: lines_per_page.max(1),
        }
    }
}

impl Default for TextPaginator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINES_PER_PAGE)
    }
}

impl DocumentRenderer for TextPaginator {
    fn to_document(&self, markup: &str) -> Result<Document, DocumentError> {
        let mut pages = Vec::new();

        for section in markup.split(PAGE_BREAK) {
            let lines: Vec<String> = section.lines().map(str::to_string).collect();
            if lines.is_empty() {
                pages.push(Page::default());
                continue;
            }
            pages.extend(
                lines
                    .chunks(self.lines_per_page)
                    .map(|chunk| Page::new(chunk.to_vec())),
            );
        }

        Ok(Document::new(pages))
    }
}
