/// User search endpoint
///
/// # Endpoints
///
/// - `GET /user/find?q=` - Prefix search over first names and emails

use crate::{app::AppState, error::ApiResult, validation::validate_request};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tasklab_shared::models::user::{User, UserSummary};
use validator::Validate;

/// Find users query
#[derive(Debug, Deserialize, Validate)]
pub struct FindUsersQuery {
    /// Search prefix, matched case-insensitively against first name and
    /// email
    #[validate(length(min = 1))]
    pub q: String,
}

/// Find users handler
///
/// Returns up to 10 users whose first name or email starts with `q`.
///
/// # Endpoint
///
/// ```text
/// GET /user/find?q=ada
/// ```
pub async fn find_users(
    State(state): State<AppState>,
    Query(query): Query<FindUsersQuery>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    validate_request(&query)?;

    let users = User::search(&state.db, &query.q).await?;

    Ok(Json(users))
}
