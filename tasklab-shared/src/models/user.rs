/// User model and database operations
///
/// Users are created at account creation and immutable thereafter except
/// for the password. Emails are stored and matched in lowercase only; the
/// normalization lives here at the model layer so no caller can bypass it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     first_name VARCHAR(255) NOT NULL,
///     last_name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL,
///     role VARCHAR(16) NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User role
///
/// Admins see every task in list queries; members see only the tasks they
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    /// Converts the role to its database string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }

    /// Parses a database role string
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "member" => Some(Role::Member),
            _ => None,
        }
    }

    /// Whether this role can see tasks created by other users
    pub fn sees_all_tasks(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// User model representing an account
///
/// The `password` field holds an argon2 hash, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address, lowercase
    pub email: String,

    /// Argon2 password hash
    pub password: String,

    /// Role string, one of `admin` / `member`
    pub role: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Public user fields, used for search results and collaborator listings
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Input for creating a new user
///
/// `password` must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Creates a new user in the database
    ///
    /// The email is lowercased before insertion. Role defaults to
    /// `member` via the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint)
    /// or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email, password, role, created_at
            "#,
        )
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email.to_lowercase())
        .bind(data.password)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// The lookup is case-insensitive: the input is lowercased to match
    /// the stored form.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Checks whether an account with this email already exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email.to_lowercase())
            .fetch_one(pool)
            .await?;

        Ok(count > 0)
    }

    /// Looks up a user's role by ID
    ///
    /// Returns `None` when no such user exists, so callers can surface a
    /// distinct not-found instead of a generic storage error.
    pub async fn role_of(pool: &PgPool, id: Uuid) -> Result<Option<String>, sqlx::Error> {
        let role = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(role)
    }

    /// Searches users by first-name or email prefix
    ///
    /// Case-insensitive prefix match, capped at 10 results.
    pub async fn search(pool: &PgPool, prefix: &str) -> Result<Vec<UserSummary>, sqlx::Error> {
        let pattern = format!("{}%", prefix);

        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, first_name, last_name, email
            FROM users
            WHERE first_name ILIKE $1 OR email ILIKE $1
            ORDER BY first_name, last_name
            LIMIT 10
            "#,
        )
        .bind(pattern)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}
