/// Common test utilities for integration tests
///
/// Provides shared infrastructure:
/// - Test database setup (connects to `DATABASE_URL`, runs migrations)
/// - Seed users with known roles
/// - Request helpers driving the router directly
/// - Cleanup of rows created by a test

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use tasklab_api::app::{build_router, AppState};
use tasklab_api::config::Config;
use tasklab_shared::models::user::{CreateUser, User};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub admin: User,
    pub member: User,
}

impl TestContext {
    /// Creates a new test context with a fresh admin and member
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to the crate manifest, not this file
        sqlx::migrate!("../migrations").run(&db).await?;

        let admin = create_user(&db, "admin").await?;
        let member = create_user(&db, "member").await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            admin,
            member,
        })
    }

    /// Removes every row created by this test
    ///
    /// `extra_users` covers users a test created beyond the seeded pair
    /// (collaborators, accounts registered through the API).
    pub async fn cleanup(&self, extra_users: &[Uuid]) -> anyhow::Result<()> {
        let mut ids = vec![self.admin.id, self.member.id];
        ids.extend_from_slice(extra_users);

        sqlx::query(
            "DELETE FROM collaborators
             WHERE user_id = ANY($1)
                OR task_id IN (SELECT id FROM tasks WHERE created_by = ANY($1))",
        )
        .bind(&ids)
        .execute(&self.db)
        .await?;

        sqlx::query("DELETE FROM tasks WHERE created_by = ANY($1)")
            .bind(&ids)
            .execute(&self.db)
            .await?;

        sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}

/// Creates a user directly in the database
///
/// The password column gets a placeholder; tests that exercise login go
/// through the create-account endpoint instead.
pub async fn create_user(db: &PgPool, role: &str) -> anyhow::Result<User> {
    let mut user = User::create(
        db,
        CreateUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("test-{}@example.com", Uuid::new_v4()),
            password: "test_hash".to_string(),
        },
    )
    .await?;

    if role != "member" {
        sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
            .bind(role)
            .bind(user.id)
            .execute(db)
            .await?;
        user.role = role.to_string();
    }

    Ok(user)
}

/// Sends a request to the router and returns status plus raw body
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().call(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, bytes.to_vec())
}

/// Sends a request and parses the response body as JSON
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Creates a task through the API and returns its ID
pub async fn create_task_via_api(
    ctx: &TestContext,
    title: &str,
    status: &str,
    created_by: Uuid,
    collaborators: &[Uuid],
) -> anyhow::Result<Uuid> {
    let (status_code, body) = send(
        &ctx.app,
        "POST",
        "/task/create",
        Some(serde_json::json!({
            "title": title,
            "status": status,
            "createdBy": created_by,
            "collaborators": collaborators,
        })),
    )
    .await;

    anyhow::ensure!(
        status_code == StatusCode::OK,
        "create failed with {}: {}",
        status_code,
        String::from_utf8_lossy(&body)
    );

    Ok(Uuid::parse_str(std::str::from_utf8(&body)?)?)
}
