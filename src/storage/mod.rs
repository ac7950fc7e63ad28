//! Storage module
//!
//! CSV-backed record store and monthly event ledger.
//! Every read-modify-write cycle runs under a per-file writer lock and
//! lands through an atomic rename.

mod codec;
pub mod employee_store;
pub mod error;
pub mod event_ledger;
pub mod lock;

pub use employee_store::EmployeeStore;
pub use error::StorageError;
pub use event_ledger::{AppendedEvent, EventLedger, NewEvent};
pub use lock::FileLocks;
