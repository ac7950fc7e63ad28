//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::document::AssembledDocument;
use crate::domain::{Assignee, DomainError, Employee, EventSummary, MonthKey, OperationContext};
use crate::error::AppError;
use crate::handlers::{
    CreateEventCommand, CreateEventHandler, EmployeePacketCommand, EmployeePacketHandler,
    ReportExportCommand, ReportExportHandler,
};
use crate::report::{Report, ReportDimension};
use crate::state::AppState;

use super::middleware::context_middleware;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct AddEmployeeRequest {
    pub id_number: String,
    pub surname: String,
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub surname: String,
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id_number: String,
    pub surname: String,
    pub name: String,
    pub contact: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id_number: employee.id.to_string(),
            surname: employee.surname,
            name: employee.name,
            contact: employee.contact.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeesResponse {
    pub employees: Vec<EmployeeResponse>,
}

/// Employee ids as a JSON array or as a string holding one.
/// Ids may be strings or numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AssignedEmployees {
    List(Vec<serde_json::Value>),
    Encoded(String),
}

impl AssignedEmployees {
    pub fn into_ids(self) -> Result<Vec<String>, DomainError> {
        let values = match self {
            Self::List(values) => values,
            Self::Encoded(raw) => serde_json::from_str(&raw).map_err(|e| {
                DomainError::malformed(format!("assigned_employees is not a JSON array: {}", e))
            })?,
        };

        values
            .into_iter()
            .map(|value| match value {
                serde_json::Value::String(id) => Ok(id),
                serde_json::Value::Number(id) => Ok(id.to_string()),
                other => Err(DomainError::malformed(format!(
                    "assigned_employees entry is not an id: {}",
                    other
                ))),
            })
            .collect()
    }
}

impl Default for AssignedEmployees {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// Amount as a JSON string or number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Text(String),
    Number(serde_json::Number),
}

impl Default for AmountField {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl std::fmt::Display for AmountField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub amount_payable: AmountField,
    #[serde(default)]
    pub assigned_employees: AssignedEmployees,
}

#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
    pub partition: String,
    pub event_id: String,
    pub rows_saved: usize,
    pub skipped_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MonthsResponse {
    pub months: Vec<MonthKey>,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventSummary>,
}

#[derive(Debug, Serialize)]
pub struct AssigneesResponse {
    pub employees: Vec<Assignee>,
}

#[derive(Debug, Serialize)]
pub struct ReportFilesResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub dimension: Option<String>,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Employees
        .route("/employees", get(list_employees).post(add_employee))
        .route(
            "/employees/:id",
            get(get_employee).put(update_employee).delete(remove_employee),
        )
        .route("/employees/:id/packet/:date", get(employee_packet))
        // Events
        .route("/events", post(create_event))
        .route("/months", get(list_months))
        .route("/months/:month/events", get(list_events))
        .route("/months/:month/events/:event_id/employees", get(list_assignees))
        // Reports
        .route("/reports/files", get(list_report_files))
        .route("/reports/:file", get(get_report))
        .route("/reports/:file/pdf/:dimension", get(export_report))
        .layer(axum::middleware::from_fn(context_middleware))
}

/// PDF body with its content headers
fn pdf_response(document: AssembledDocument, disposition: &str) -> Response {
    let filename = document.filename.replace('"', "");
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{}; filename=\"{}\"", disposition, filename),
            ),
        ],
        document.bytes,
    )
        .into_response()
}

// =========================================================================
// GET /employees
// =========================================================================

/// List employees sorted by surname
async fn list_employees(State(state): State<AppState>) -> Result<Json<EmployeesResponse>, AppError> {
    let employees = state.employees.list().await?;

    Ok(Json(EmployeesResponse {
        employees: employees.into_iter().map(EmployeeResponse::from).collect(),
    }))
}

// =========================================================================
// POST /employees
// =========================================================================

/// Add a new employee
async fn add_employee(
    State(state): State<AppState>,
    payload: Result<Json<AddEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EmployeeResponse>), AppError> {
    let Json(request) = payload?;
    let employee = state
        .employees
        .add(&request.id_number, &request.surname, &request.name, &request.contact)
        .await?;

    Ok((StatusCode::CREATED, Json(employee.into())))
}

// =========================================================================
// GET /employees/:id
// =========================================================================

/// Get employee by ID number
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = state
        .employees
        .find(&id)
        .await?
        .ok_or_else(|| DomainError::EmployeeNotFound(id.clone()))?;

    Ok(Json(employee.into()))
}

// =========================================================================
// PUT /employees/:id
// =========================================================================

/// Replace surname, name and contact
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let Json(request) = payload?;
    let employee = state
        .employees
        .update(&id, &request.surname, &request.name, &request.contact)
        .await?;

    Ok(Json(employee.into()))
}

// =========================================================================
// DELETE /employees/:id
// =========================================================================

/// Remove an employee
async fn remove_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.employees.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// GET /employees/:id/packet/:date
// =========================================================================

/// Employment agreement, wage claim and payment acknowledgment as one PDF
async fn employee_packet(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Path((id, date)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let packet = EmployeePacketHandler::new(&state)
        .execute(EmployeePacketCommand::new(id, date), &context)
        .await?;

    Ok(pdf_response(packet, "inline"))
}

// =========================================================================
// POST /events
// =========================================================================

/// Assign employees to an event
async fn create_event(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateEventResponse>), AppError> {
    let Json(request) = payload?;
    let command = CreateEventCommand::new(
        request.event_name,
        request.event_date,
        request.amount_payable.to_string(),
        request.assigned_employees.into_ids()?,
    );

    let result = CreateEventHandler::new(&state)
        .execute(command, &context)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            partition: result.partition,
            event_id: result.event_id,
            rows_saved: result.rows_saved,
            skipped_ids: result.skipped_ids,
        }),
    ))
}

// =========================================================================
// GET /months
// =========================================================================

/// Months that have events, newest first
async fn list_months(State(state): State<AppState>) -> Result<Json<MonthsResponse>, AppError> {
    let months = state.ledger.list_months().await?;
    Ok(Json(MonthsResponse { months }))
}

// =========================================================================
// GET /months/:month/events
// =========================================================================

/// Events of a month
async fn list_events(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<EventsResponse>, AppError> {
    let month = MonthKey::parse(&month)?;
    let events = state.ledger.list_events(&month).await?;
    Ok(Json(EventsResponse { events }))
}

// =========================================================================
// GET /months/:month/events/:event_id/employees
// =========================================================================

/// Employees assigned to an event
async fn list_assignees(
    State(state): State<AppState>,
    Path((month, event_id)): Path<(String, String)>,
) -> Result<Json<AssigneesResponse>, AppError> {
    let month = MonthKey::parse(&month)?;
    let employees = state.ledger.list_assignees(&month, &event_id).await?;
    Ok(Json(AssigneesResponse { employees }))
}

// =========================================================================
// GET /reports/files
// =========================================================================

/// Partition files available for reporting
async fn list_report_files(
    State(state): State<AppState>,
) -> Result<Json<ReportFilesResponse>, AppError> {
    let files = state.ledger.list_partition_files().await?;
    Ok(Json(ReportFilesResponse { files }))
}

// =========================================================================
// GET /reports/:file
// =========================================================================

/// Sorted report rows and total; an absent partition gives an empty report
async fn get_report(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Report>, AppError> {
    let month = MonthKey::from_file_name(&file)?;
    let dimension = match query.dimension.as_deref() {
        Some(raw) if !raw.is_empty() => raw.parse::<ReportDimension>()?,
        _ => ReportDimension::default(),
    };

    let report = state.reports.render_report(&month, dimension).await?;
    Ok(Json(report))
}

// =========================================================================
// GET /reports/:file/pdf/:dimension
// =========================================================================

/// Report as a PDF download
async fn export_report(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Path((file, dimension)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let dimension: ReportDimension = dimension.parse()?;

    let export = ReportExportHandler::new(&state)
        .execute(ReportExportCommand::new(file, dimension), &context)
        .await?;

    Ok(pdf_response(export, "attachment"))
}
