/// Edit task endpoint
///
/// Updates the task's mutable fields and fully replaces its
/// collaborator set (never a diff) in a single transaction.
///
/// # Endpoint
///
/// `PUT /task/edit`
///
/// # Example Request
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "title": "Write spec",
///   "status": "inprogress",
///   "collaborators": ["6fa459ea-ee8a-3ca4-894e-db77e160355e"]
/// }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    validation::validate_request,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use tasklab_shared::models::task::{Task, UpdateTask};
use uuid::Uuid;
use validator::Validate;

/// Edit task request
///
/// `id` and `createdBy` are immutable; only the fields here change.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskRequest {
    /// Task ID
    pub id: Uuid,

    /// New title
    #[validate(length(min = 1))]
    pub title: String,

    /// New description; absent clears the column to NULL
    pub description: Option<String>,

    /// New due date; absent clears the column to NULL
    pub due_date: Option<NaiveDate>,

    /// New status
    #[validate(custom(function = "crate::validation::validate_status"))]
    pub status: String,

    /// Full replacement collaborator set; may be empty
    pub collaborators: Vec<Uuid>,
}

/// Edit task endpoint handler
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or validation failure
/// - `404 Not Found`: no task with this ID (nothing is changed)
/// - `500 Internal Server Error`: storage failure; the transaction
///   rolls back, leaving the previous task and collaborators intact
pub async fn edit_task(
    State(state): State<AppState>,
    Json(req): Json<EditTaskRequest>,
) -> ApiResult<StatusCode> {
    validate_request(&req)?;
    let status = super::parse_status(&req.status)?;

    let updated = Task::update(
        &state.db,
        UpdateTask {
            id: req.id,
            title: req.title,
            description: req.description,
            status,
            due_date: req.due_date,
            collaborators: req.collaborators,
        },
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
