//! Application state
//!
//! Stores and services shared by every request handler.

use crate::config::{Config, StorageConfig};
use crate::document::DocumentAssembler;
use crate::domain::EmployerInfo;
use crate::report::ReportAggregator;
use crate::storage::{EmployeeStore, EventLedger, FileLocks};

#[derive(Clone)]
pub struct AppState {
    pub employees: EmployeeStore,
    pub ledger: EventLedger,
    pub reports: ReportAggregator,
    pub assembler: DocumentAssembler,
    pub employer: EmployerInfo,
}

impl AppState {
    /// Wire the stores over one lock registry so every file has one writer
    pub fn new(storage: StorageConfig, employer: EmployerInfo) -> Self {
        let locks = FileLocks::new();
        let ledger = EventLedger::new(storage.event_dir, locks.clone());

        Self {
            employees: EmployeeStore::new(storage.employee_csv, locks),
            reports: ReportAggregator::new(ledger.clone()),
            ledger,
            assembler: DocumentAssembler::builtin(),
            employer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.storage.clone(), config.employer.clone())
    }
}
