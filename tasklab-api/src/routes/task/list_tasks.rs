/// List tasks endpoint
///
/// The paginated, role-aware task listing. Admins see every task;
/// members only the tasks they created. An optional status filter
/// narrows the page, and the total count respects the same visibility
/// scope as the data.
///
/// # Endpoint
///
/// `GET /task/list?limit=10&offset=0&status=all&userId=<uuid>`
///
/// # Example Response
///
/// ```json
/// {
///   "limit": 10,
///   "offset": 0,
///   "total": 42,
///   "data": [
///     {
///       "id": "550e8400-e29b-41d4-a716-446655440000",
///       "title": "Write spec",
///       "status": "todo",
///       "dueDate": "2025-06-01",
///       "creatorId": "6fa459ea-ee8a-3ca4-894e-db77e160355e",
///       "firstName": "Ada",
///       "lastName": "Lovelace",
///       "email": "ada@example.com",
///       "role": "member"
///     }
///   ]
/// }
/// ```

use crate::{app::AppState, error::ApiError, error::ApiResult, validation::validate_request};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tasklab_shared::models::{
    task::{StatusFilter, Task, TaskVisibility, TaskWithCreator},
    user::{Role, User},
};
use uuid::Uuid;
use validator::Validate;

fn default_status_filter() -> String {
    "all".to_string()
}

/// List tasks query parameters
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    /// Page size, at least 1
    #[validate(range(min = 1))]
    pub limit: i64,

    /// Rows to skip before the page starts
    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,

    /// Status filter: `all` or one of the status values
    #[serde(default = "default_status_filter")]
    #[validate(custom(function = "crate::validation::validate_status_filter"))]
    pub status: String,

    /// Requesting user's ID; decides the visibility scope
    pub user_id: Uuid,
}

/// Pagination envelope
#[derive(Debug, Serialize)]
pub struct TaskPage {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
    pub data: Vec<TaskWithCreator>,
}

/// List tasks endpoint handler
///
/// # Errors
///
/// - `400 Bad Request`: malformed query or validation failure
/// - `404 Not Found`: no user with the given `userId`
/// - `500 Internal Server Error`: storage failure
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<TaskPage>> {
    validate_request(&query)?;

    let role = User::role_of(&state.db, query.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    // A value outside the enum cannot pass the schema CHECK; fall back to
    // the least-privileged scope anyway.
    let role = Role::parse(&role).unwrap_or(Role::Member);

    let visibility = if role.sees_all_tasks() {
        TaskVisibility::All
    } else {
        TaskVisibility::CreatedBy(query.user_id)
    };

    let filter = StatusFilter::parse(&query.status)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid status filter: {}", query.status)))?;

    let total = Task::count(&state.db, &visibility).await?;
    let data = Task::list_page(&state.db, &visibility, &filter, query.limit, query.offset).await?;

    Ok(Json(TaskPage {
        limit: query.limit,
        offset: query.offset,
        total,
        data,
    }))
}
