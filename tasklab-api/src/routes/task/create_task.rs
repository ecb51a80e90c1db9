/// Create task endpoint
///
/// Creates a task row and its collaborator rows in a single
/// transaction, so a failure partway leaves nothing behind.
///
/// # Endpoint
///
/// `POST /task/create`
///
/// # Example Request
///
/// ```json
/// {
///   "title": "Write spec",
///   "description": "First draft",
///   "createdBy": "550e8400-e29b-41d4-a716-446655440000",
///   "dueDate": "2025-06-01",
///   "status": "todo",
///   "collaborators": ["6fa459ea-ee8a-3ca4-894e-db77e160355e"]
/// }
/// ```
///
/// # Response
///
/// The new task's ID as plain text.

use crate::{app::AppState, error::ApiResult, validation::validate_request};
use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use tasklab_shared::models::task::{CreateTask, Task};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1))]
    pub title: String,

    /// Optional description; absent means NULL, not empty string
    pub description: Option<String>,

    /// Creating user's ID
    pub created_by: Uuid,

    /// Optional due date (ISO `YYYY-MM-DD`)
    pub due_date: Option<NaiveDate>,

    /// Status, one of `todo` / `inprogress` / `done`
    #[validate(custom(function = "crate::validation::validate_status"))]
    pub status: String,

    /// Collaborator user IDs; may be empty
    pub collaborators: Vec<Uuid>,
}

/// Create task endpoint handler
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or validation failure
/// - `500 Internal Server Error`: storage failure (e.g. unknown
///   `createdBy`); the transaction rolls back, leaving no orphan task
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<String> {
    validate_request(&req)?;
    let status = super::parse_status(&req.status)?;

    let id = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            status,
            due_date: req.due_date,
            created_by: req.created_by,
            collaborators: req.collaborators,
        },
    )
    .await?;

    Ok(id.to_string())
}
