//! Command Handlers module
//!
//! Handlers that orchestrate operations spanning several components.
//! Single-store operations are called from the routes directly.

mod commands;
mod event_handler;
mod packet_handler;
mod report_handler;

#[cfg(test)]
mod tests;

pub use commands::*;
pub use event_handler::CreateEventHandler;
pub use packet_handler::EmployeePacketHandler;
pub use report_handler::ReportExportHandler;
