//! HTTP surface for Rusty Roster.
//!
//! All routes live under `/students`:
//!
//! - `GET /students` – List every stored record (order unspecified).
//! - `POST /students` – Create a record; `409` when the id is already taken.
//! - `GET /students/{id}` – Fetch one record.
//! - `PUT /students/{id}` – Replace a record wholesale; the path id overrides the body id.
//! - `DELETE /students/{id}` – Remove a record; `204` with an empty body.
//! - `GET /students/{id}/summary` – Generate a short profile through the summarizer.
//!
//! Errors are plain text. Missing records are always `404`.

use crate::model::{Student, StudentId, StudentSummary};
use crate::store::{StoreError, StudentStore};
use crate::summarization::{StudentSummarizer, SummarizationClientError};
use crate::validation::{ValidationError, validate_student};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Record store; the only shared mutable state.
    pub store: Arc<StudentStore>,
    /// Summary generator used by the summary route.
    pub summarizer: StudentSummarizer,
}

impl AppState {
    /// Bundle a store and summarizer for the router.
    pub fn new(store: Arc<StudentStore>, summarizer: StudentSummarizer) -> Self {
        Self { store, summarizer }
    }
}

/// Build the HTTP router with request tracing and panic recovery.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/students/:id/summary", get(get_student_summary))
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn list_students(State(state): State<AppState>) -> Json<Vec<Student>> {
    let students = state.store.list_all().await;
    tracing::debug!(count = students.len(), "Listed students");
    Json(students)
}

async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let student = decode_student(&body)?;
    let created = state.store.insert(student).await?;
    tracing::info!(id = created.id, "Student created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&raw_id)?;
    let student = state.store.get(id).await?;
    tracing::debug!(id, "Fetched student");
    Ok(Json(student))
}

async fn update_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&raw_id)?;
    let student = decode_student(&body)?;
    let updated = state.store.replace(id, student).await?;
    tracing::info!(id, "Student updated");
    Ok(Json(updated))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state.store.delete(id).await?;
    tracing::info!(id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// The store lock is released before the provider call, so the summary reflects the record as
/// read here even if it is updated or deleted while generation runs.
async fn get_student_summary(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<StudentSummary>, ApiError> {
    let id = parse_id(&raw_id)?;
    let student = state.store.get(id).await?;
    let summary = state.summarizer.summarize(&student).await?;
    tracing::info!(id, "Student summary generated");
    Ok(Json(summary))
}

fn parse_id(raw: &str) -> Result<StudentId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

/// Decode a request body and run the acceptance rules on it.
fn decode_student(body: &[u8]) -> Result<Student, ApiError> {
    let student: Student = serde_json::from_slice(body).map_err(|error| {
        tracing::debug!(%error, "Rejected request body");
        ApiError::InvalidBody
    })?;
    validate_student(&student)?;
    Ok(student)
}

/// Request failures mapped onto status codes and plain-text bodies.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not a Student JSON document.
    InvalidBody,
    /// Path id was not a base-10 integer.
    InvalidId,
    /// Record failed a validation rule.
    Validation(ValidationError),
    /// Store rejected the operation.
    Store(StoreError),
    /// Summary generation failed; details are logged, not returned.
    Summarization(SummarizationClientError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid request body".to_string()),
            Self::InvalidId => (
                StatusCode::BAD_REQUEST,
                "Invalid student id format".to_string(),
            ),
            Self::Validation(error) => (StatusCode::BAD_REQUEST, error.to_string()),
            Self::Store(StoreError::Conflict(_)) => {
                (StatusCode::CONFLICT, "Student already exists".to_string())
            }
            Self::Store(StoreError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Student not found".to_string())
            }
            Self::Summarization(error) => {
                tracing::error!(error = %error, "Summary generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate summary".to_string(),
                )
            }
        };
        (status, message).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(inner: ValidationError) -> Self {
        Self::Validation(inner)
    }
}

impl From<StoreError> for ApiError {
    fn from(inner: StoreError) -> Self {
        Self::Store(inner)
    }
}

impl From<SummarizationClientError> for ApiError {
    fn from(inner: SummarizationClientError) -> Self {
        Self::Summarization(inner)
    }
}
