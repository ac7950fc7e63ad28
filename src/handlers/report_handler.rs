//! Report Export Handler
//!
//! Renders a month report as a PDF attachment.

use crate::document::{AssembledDocument, DocumentAssembler};
use crate::domain::{DomainError, MonthKey, OperationContext};
use crate::error::AppError;
use crate::report::ReportAggregator;
use crate::state::AppState;
use crate::storage::EventLedger;

use super::ReportExportCommand;

/// Handler for report export
pub struct ReportExportHandler {
    ledger: EventLedger,
    reports: ReportAggregator,
    assembler: DocumentAssembler,
}

impl ReportExportHandler {
    pub fn new(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            reports: state.reports.clone(),
            assembler: state.assembler.clone(),
        }
    }

    /// Execute the report export command
    pub async fn execute(
        &self,
        command: ReportExportCommand,
        context: &OperationContext,
    ) -> Result<AssembledDocument, AppError> {
        let month = MonthKey::from_file_name(command.file.trim())?;

        // JSON reports degrade to empty; an export of nothing is a 404
        if !self.ledger.partition_exists(&month).await? {
            return Err(DomainError::NotFound(format!("report {}", month.file_name())).into());
        }

        let report = self.reports.render_report(&month, command.dimension).await?;
        let export = self.assembler.report_export(&report)?;

        tracing::info!(
            request_id = ?context.request_id,
            client_ip = ?context.client_ip,
            partition = %month,
            dimension = %command.dimension,
            rows = report.rows.len(),
            pages = export.page_count,
            "Report exported"
        );

        Ok(export)
    }
}
