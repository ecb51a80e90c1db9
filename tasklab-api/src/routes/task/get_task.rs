/// Get task endpoint
///
/// Fetches a single task's fields plus its collaborators with full user
/// details.
///
/// # Endpoint
///
/// `GET /task/:id`
///
/// # Example Response
///
/// ```json
/// {
///   "title": "Write spec",
///   "status": "todo",
///   "dueDate": "2025-06-01",
///   "collaborators": [
///     {
///       "id": "6fa459ea-ee8a-3ca4-894e-db77e160355e",
///       "firstName": "Ada",
///       "lastName": "Lovelace",
///       "email": "ada@example.com"
///     }
///   ]
/// }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use tasklab_shared::models::{collaborator, task::Task, user::UserSummary};
use uuid::Uuid;

/// Get task response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTaskResponse {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub status: String,

    /// Serialized as `YYYY-MM-DD`, omitted when null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    pub collaborators: Vec<UserSummary>,
}

/// Get task endpoint handler
///
/// # Errors
///
/// - `400 Bad Request`: malformed task ID in the path
/// - `404 Not Found`: no task with this ID
/// - `500 Internal Server Error`: storage failure
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<GetTaskResponse>> {
    let task = Task::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let collaborators = collaborator::list_for_task(&state.db, id).await?;

    Ok(Json(GetTaskResponse {
        title: task.title,
        description: task.description,
        status: task.status,
        due_date: task.due_date,
        collaborators,
    }))
}
