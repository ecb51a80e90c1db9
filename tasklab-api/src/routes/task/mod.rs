/// Task endpoints
///
/// The core of the service: task creation, paginated role-aware listing,
/// edit with full collaborator replacement, fetch, and delete. One file
/// per operation.
///
/// # Endpoints
///
/// - `POST /task/create`
/// - `GET /task/list`
/// - `PUT /task/edit`
/// - `GET /task/:id`
/// - `DELETE /task/:id`

mod create_task;
mod delete_task;
mod edit_task;
mod get_task;
mod list_tasks;

pub use create_task::create_task;
pub use delete_task::delete_task;
pub use edit_task::edit_task;
pub use get_task::get_task;
pub use list_tasks::list_tasks;

use crate::error::ApiError;
use tasklab_shared::models::task::TaskStatus;

/// Parses an already-validated status string
///
/// The validation helper rejects anything outside the enum before this
/// runs; the error arm keeps the parse total without panicking.
fn parse_status(status: &str) -> Result<TaskStatus, ApiError> {
    TaskStatus::parse(status)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid status: {}", status)))
}
