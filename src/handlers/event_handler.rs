//! Event Creation Handler
//!
//! Resolves assigned employees against the record store and appends one
//! row per resolved employee to the event's month partition.

use crate::domain::OperationContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::storage::{EmployeeStore, EventLedger, NewEvent};

use super::{CreateEventCommand, CreateEventResult};

/// Handler for event creation
pub struct CreateEventHandler {
    employees: EmployeeStore,
    ledger: EventLedger,
}

impl CreateEventHandler {
    pub fn new(state: &AppState) -> Self {
        Self {
            employees: state.employees.clone(),
            ledger: state.ledger.clone(),
        }
    }

    /// Execute the create event command
    pub async fn execute(
        &self,
        command: CreateEventCommand,
        context: &OperationContext,
    ) -> Result<CreateEventResult, AppError> {
        // Validate everything before touching the partition
        let event = NewEvent::parse(
            &command.event_name,
            &command.date,
            &command.amount_payable,
            &command.employee_ids,
        )?;

        let roster = self.employees.snapshot().await?;
        let appended = self.ledger.append_event(&event, &roster).await?;

        if !appended.skipped_ids.is_empty() {
            tracing::warn!(
                request_id = ?context.request_id,
                partition = %appended.partition,
                skipped_ids = ?appended.skipped_ids,
                "Assigned employees not found, skipped"
            );
        }

        tracing::info!(
            request_id = ?context.request_id,
            client_ip = ?context.client_ip,
            partition = %appended.partition,
            event_id = %appended.event_id,
            rows_saved = appended.rows_saved,
            "Event created"
        );

        Ok(CreateEventResult {
            partition: appended.partition.to_string(),
            event_id: appended.event_id.encode(),
            rows_saved: appended.rows_saved,
            skipped_ids: appended.skipped_ids,
        })
    }
}
