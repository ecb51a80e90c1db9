/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/login` - Verify credentials, return the account summary
/// - `POST /auth/create-account` - Register a new account
///
/// There is no session or token layer: login simply checks credentials
/// and hands back `{id, email, role}` for the client to carry.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    validation::validate_request,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tasklab_shared::{
    auth::password,
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email)]
    pub email: String,

    /// Password
    #[validate(length(min = 8))]
    pub password: String,
}

/// Create account request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// First name
    #[validate(length(min = 1))]
    pub first_name: String,

    /// Last name
    #[validate(length(min = 1))]
    pub last_name: String,

    /// Email address
    #[validate(email)]
    pub email: String,

    /// Password (stored hashed, never plaintext)
    #[validate(length(min = 8))]
    pub password: String,
}

/// Account summary returned by both auth endpoints
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// User ID
    pub id: Uuid,

    /// Email address, lowercase
    pub email: String,

    /// Role (`admin` or `member`)
    pub role: String,
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "hunter2hunter2"
/// }
/// ```
///
/// # Errors
///
/// An unknown email and a wrong password produce the same message, so
/// the response never reveals whether an account exists.
///
/// - `400 Bad Request`: validation failed, or "Email/Password is incorrect"
/// - `500 Internal Server Error`: storage failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AccountResponse>> {
    validate_request(&req)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Email/Password is incorrect".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password)?;
    if !valid {
        return Err(ApiError::BadRequest(
            "Email/Password is incorrect".to_string(),
        ));
    }

    Ok(Json(AccountResponse {
        id: user.id,
        email: user.email,
        role: user.role,
    }))
}

/// Create account endpoint
///
/// # Endpoint
///
/// ```text
/// POST /auth/create-account
/// Content-Type: application/json
///
/// {
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "email": "ada@example.com",
///   "password": "hunter2hunter2"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, or "Account already exists"
///   (email match is case-insensitive)
/// - `500 Internal Server Error`: storage failure
pub async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<Json<AccountResponse>> {
    validate_request(&req)?;

    if User::email_exists(&state.db, &req.email).await? {
        return Err(ApiError::BadRequest("Account already exists".to_string()));
    }

    let hashed = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: hashed,
        },
    )
    .await?;

    Ok(Json(AccountResponse {
        id: user.id,
        email: user.email,
        role: user.role,
    }))
}
