//! Handler tests
//!
//! Each test runs against its own temporary data directory.

#[cfg(test)]
mod tests {
    use crate::config::StorageConfig;
    use crate::domain::{DomainError, EmployerInfo, OperationContext};
    use crate::error::AppError;
    use crate::handlers::{
        CreateEventCommand, CreateEventHandler, EmployeePacketCommand, EmployeePacketHandler,
        ReportExportCommand, ReportExportHandler,
    };
    use crate::report::ReportDimension;
    use crate::state::AppState;
    use tempfile::TempDir;

    const JANE: &str = "1234567890123";
    const SAM: &str = "9876543210987";

    async fn setup() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let state = AppState::new(StorageConfig::under(dir.path()), EmployerInfo::default());

        state
            .employees
            .add(JANE, "Doe", "Jane", "0821234567")
            .await
            .unwrap();
        state
            .employees
            .add(SAM, "Adams", "Sam", "0839876543")
            .await
            .unwrap();

        (dir, state)
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // CreateEventHandler
    // =========================================================================

    #[tokio::test]
    async fn test_create_event_saves_row_per_employee() {
        let (_dir, state) = setup().await;
        let handler = CreateEventHandler::new(&state);

        let result = handler
            .execute(
                CreateEventCommand::new("Gala Night", "2024-01-20", "150", ids(&[JANE, SAM])),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.partition, "202401");
        assert_eq!(result.event_id, "2024-01-20_Gala_Night");
        assert_eq!(result.rows_saved, 2);
        assert!(result.skipped_ids.is_empty());
    }

    #[tokio::test]
    async fn test_create_event_reports_skipped_ids() {
        let (_dir, state) = setup().await;
        let handler = CreateEventHandler::new(&state);

        let result = handler
            .execute(
                CreateEventCommand::new("Fair", "2024-02-03", "80", ids(&[JANE, "0000000000000"])),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.rows_saved, 1);
        assert_eq!(result.skipped_ids, vec!["0000000000000".to_string()]);
    }

    #[tokio::test]
    async fn test_create_event_with_bad_date_writes_nothing() {
        let (_dir, state) = setup().await;
        let handler = CreateEventHandler::new(&state);

        let err = handler
            .execute(
                CreateEventCommand::new("Fair", "13-2024-01", "80", ids(&[JANE])),
                &OperationContext::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::MalformedData(_))));
        assert!(state.ledger.list_months().await.unwrap().is_empty());
    }

    // =========================================================================
    // EmployeePacketHandler
    // =========================================================================

    #[tokio::test]
    async fn test_packet_for_assigned_employee() {
        let (_dir, state) = setup().await;
        CreateEventHandler::new(&state)
            .execute(
                CreateEventCommand::new("Gala Night", "2024-01-20", "150", ids(&[JANE])),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        let packet = EmployeePacketHandler::new(&state)
            .execute(
                EmployeePacketCommand::new(JANE, "2024-01-20"),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        assert_eq!(packet.filename, "Doe_Jane_20240120.pdf");
        assert_eq!(packet.page_count, 3);
        assert!(packet.bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_packet_without_assignment_is_not_found() {
        let (_dir, state) = setup().await;
        let handler = EmployeePacketHandler::new(&state);

        let unknown_employee = handler
            .execute(
                EmployeePacketCommand::new("0000000000000", "2024-01-20"),
                &OperationContext::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            unknown_employee,
            AppError::Domain(DomainError::EmployeeNotFound(_))
        ));

        let no_event = handler
            .execute(
                EmployeePacketCommand::new(SAM, "2024-01-20"),
                &OperationContext::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(no_event, AppError::Domain(DomainError::NotFound(_))));
    }

    // =========================================================================
    // ReportExportHandler
    // =========================================================================

    #[tokio::test]
    async fn test_report_export_of_existing_month() {
        let (_dir, state) = setup().await;
        CreateEventHandler::new(&state)
            .execute(
                CreateEventCommand::new("Fair", "2024-03-09", "99.5", ids(&[JANE, SAM])),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        let export = ReportExportHandler::new(&state)
            .execute(
                ReportExportCommand::new("202403.csv", ReportDimension::ByEvent),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        assert_eq!(export.filename, "202403_by_event.pdf");
        assert_eq!(export.page_count, 1);
    }

    #[tokio::test]
    async fn test_report_export_rejects_missing_and_invalid_files() {
        let (_dir, state) = setup().await;
        let handler = ReportExportHandler::new(&state);

        let missing = handler
            .execute(
                ReportExportCommand::new("209912.csv", ReportDimension::ByDate),
                &OperationContext::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(missing, AppError::Domain(DomainError::NotFound(_))));

        let traversal = handler
            .execute(
                ReportExportCommand::new("../employees/employee_data.csv", ReportDimension::ByDate),
                &OperationContext::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(traversal, AppError::Domain(DomainError::Validation(_))));
    }
}
