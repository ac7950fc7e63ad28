//! Domain module
//!
//! Core domain types and validation rules.

pub mod amount;
pub mod context;
pub mod employee;
pub mod employer;
pub mod error;
pub mod event;

pub use amount::{Amount, AmountError};
pub use context::OperationContext;
pub use employee::{Contact, Employee, EmployeeId};
pub use employer::EmployerInfo;
pub use error::DomainError;
pub use event::{parse_event_date, Assignee, EventId, EventRow, EventSummary, MonthKey};

impl From<AmountError> for DomainError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::ParseError(_) => DomainError::MalformedData(err.to_string()),
            AmountError::Negative(_) | AmountError::Overflow => {
                DomainError::Validation(err.to_string())
            }
            AmountError::TotalOverflow => DomainError::MalformedData(err.to_string()),
        }
    }
}
