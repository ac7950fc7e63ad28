//! Employee Packet Handler
//!
//! Looks up an employee and their assignment on a date, then assembles
//! the packet forms into one PDF.

use crate::document::{AssembledDocument, DocumentAssembler, PacketContext};
use crate::domain::{parse_event_date, DomainError, EmployerInfo, OperationContext};
use crate::error::AppError;
use crate::state::AppState;
use crate::storage::{EmployeeStore, EventLedger};

use super::EmployeePacketCommand;

/// Handler for employee packet generation
pub struct EmployeePacketHandler {
    employees: EmployeeStore,
    ledger: EventLedger,
    assembler: DocumentAssembler,
    employer: EmployerInfo,
}

impl EmployeePacketHandler {
    pub fn new(state: &AppState) -> Self {
        Self {
            employees: state.employees.clone(),
            ledger: state.ledger.clone(),
            assembler: state.assembler.clone(),
            employer: state.employer.clone(),
        }
    }

    /// Execute the employee packet command
    pub async fn execute(
        &self,
        command: EmployeePacketCommand,
        context: &OperationContext,
    ) -> Result<AssembledDocument, AppError> {
        let employee = self
            .employees
            .find(&command.employee_id)
            .await?
            .ok_or_else(|| DomainError::EmployeeNotFound(command.employee_id.trim().to_string()))?;

        let date = parse_event_date(&command.date)?;

        let event = self
            .ledger
            .find_assignment(&employee.id, date)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "no event for employee {} on {}",
                    employee.id, date
                ))
            })?;

        let packet = self.assembler.employee_packet(PacketContext {
            employee: &employee,
            event: &event,
            employer: &self.employer,
        })?;

        tracing::info!(
            request_id = ?context.request_id,
            client_ip = ?context.client_ip,
            employee_id = %employee.id,
            date = %date,
            pages = packet.page_count,
            "Employee packet generated"
        );

        Ok(packet)
    }
}
