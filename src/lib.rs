//! form_easy Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod document;
pub mod domain;
pub mod handlers;
pub mod report;
pub mod state;
pub mod storage;

mod error;

pub use config::{Config, StorageConfig};
pub use error::{AppError, AppResult, ErrorResponse};
pub use domain::{Amount, AmountError, DomainError, EmployerInfo, OperationContext};
pub use state::AppState;
