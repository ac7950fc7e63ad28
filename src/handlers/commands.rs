//! Command definitions
//!
//! Commands carry raw request input; handlers validate them.

use serde::{Deserialize, Serialize};

use crate::report::ReportDimension;

// =========================================================================
// CreateEventCommand
// =========================================================================

/// Command to assign employees to a new event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventCommand {
    pub event_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Decimal string, e.g. `"150"` or `"99.5"`
    pub amount_payable: String,
    pub employee_ids: Vec<String>,
}

impl CreateEventCommand {
    pub fn new(
        event_name: impl Into<String>,
        date: impl Into<String>,
        amount_payable: impl Into<String>,
        employee_ids: Vec<String>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            date: date.into(),
            amount_payable: amount_payable.into(),
            employee_ids,
        }
    }
}

/// Result of a successful event creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventResult {
    /// Partition id, `YYYYMM`
    pub partition: String,
    pub event_id: String,
    pub rows_saved: usize,
    pub skipped_ids: Vec<String>,
}

// =========================================================================
// EmployeePacketCommand
// =========================================================================

/// Command to render the forms of one employee for one event day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePacketCommand {
    pub employee_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl EmployeePacketCommand {
    pub fn new(employee_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            date: date.into(),
        }
    }
}

// =========================================================================
// ReportExportCommand
// =========================================================================

/// Command to export a month report as PDF
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExportCommand {
    /// Partition file name, `YYYYMM.csv`
    pub file: String,
    pub dimension: ReportDimension,
}

impl ReportExportCommand {
    pub fn new(file: impl Into<String>, dimension: ReportDimension) -> Self {
        Self {
            file: file.into(),
            dimension,
        }
    }
}
