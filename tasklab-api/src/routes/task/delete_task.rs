/// Delete task endpoint
///
/// Removes a task and its collaborator rows in one transaction,
/// collaborators first so association rows can never outlive the task.
///
/// # Endpoint
///
/// `DELETE /task/:id`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tasklab_shared::models::task::Task;
use uuid::Uuid;

/// Delete task endpoint handler
///
/// # Errors
///
/// - `400 Bad Request`: malformed task ID in the path
/// - `404 Not Found`: no task with this ID
/// - `500 Internal Server Error`: storage failure
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Task::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
