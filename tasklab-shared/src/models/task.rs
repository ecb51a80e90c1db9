/// Task model and database operations
///
/// Tasks are the core entity: a unit of work with a title, status,
/// optional due date, and a creator. Each mutating operation runs inside
/// one transaction so the task row and its collaborator rows can never
/// diverge; a failure partway rolls everything back.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status VARCHAR(16) NOT NULL,
///     due_date DATE,
///     created_by UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use crate::models::collaborator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Converts the status to its database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Done => "done",
        }
    }

    /// Parses a status string
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(TaskStatus::Todo),
            "inprogress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Status filter for list queries
///
/// `all` widens the page to every status; anything else narrows it to an
/// equality match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// Parses a filter string (`all` plus the three status values)
    pub fn parse(value: &str) -> Option<Self> {
        if value == "all" {
            return Some(StatusFilter::All);
        }
        TaskStatus::parse(value).map(StatusFilter::Only)
    }
}

/// Which tasks a list query may see
///
/// Admins see everything; members only what they created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskVisibility {
    All,
    CreatedBy(Uuid),
}

/// Row type for the paginated list: task fields plus creator summary
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithCreator {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub creator_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

/// Row type for a single task fetch
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskDetail {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub due_date: Option<NaiveDate>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub created_by: Uuid,
    pub collaborators: Vec<Uuid>,
}

/// Input for editing an existing task
///
/// `created_by` and `id` are immutable; the collaborator list is the full
/// replacement set, not a diff.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub collaborators: Vec<Uuid>,
}

/// Builds the filtered, paginated page query
///
/// Joins tasks to their creators, narrows by visibility and status, and
/// orders by `created_at DESC, id DESC` so pages stay stable across
/// requests.
fn page_query(
    visibility: &TaskVisibility,
    filter: &StatusFilter,
    limit: i64,
    offset: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT tasks.id, tasks.title, tasks.description, tasks.status, tasks.due_date, \
         users.id AS creator_id, users.first_name, users.last_name, users.email, users.role \
         FROM tasks JOIN users ON tasks.created_by = users.id",
    );

    let mut has_where = false;
    if let TaskVisibility::CreatedBy(user_id) = visibility {
        qb.push(" WHERE tasks.created_by = ").push_bind(*user_id);
        has_where = true;
    }
    if let StatusFilter::Only(status) = filter {
        qb.push(if has_where { " AND " } else { " WHERE " });
        qb.push("tasks.status = ").push_bind(status.as_str());
    }

    qb.push(" ORDER BY tasks.created_at DESC, tasks.id DESC");
    qb.push(" LIMIT ").push_bind(limit);
    qb.push(" OFFSET ").push_bind(offset);
    qb
}

/// Task database operations
pub struct Task;

impl Task {
    /// Creates a task and its collaborator rows in one transaction
    ///
    /// Absent description/due date are bound as NULL, never as empty
    /// strings, so "unset" stays distinguishable from "empty". Any
    /// failure, including a bad collaborator reference, rolls the whole
    /// operation back.
    ///
    /// # Returns
    ///
    /// The new task's ID.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Uuid, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO tasks (title, description, status, due_date, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.status.as_str())
        .bind(data.due_date)
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await?;

        collaborator::insert_for_task(&mut tx, id, &data.collaborators).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Updates a task and fully replaces its collaborator set
    ///
    /// One transaction: update the row (touching `updated_at`), delete
    /// every existing collaborator row, insert the replacement set.
    ///
    /// # Returns
    ///
    /// `false` when no task with this ID exists (nothing is changed).
    pub async fn update(pool: &PgPool, data: UpdateTask) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, status = $3, due_date = $4, updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.status.as_str())
        .bind(data.due_date)
        .bind(data.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        collaborator::delete_for_task(&mut tx, data.id).await?;
        collaborator::insert_for_task(&mut tx, data.id, &data.collaborators).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Deletes a task and its collaborator rows in one transaction
    ///
    /// Collaborators go first so the association rows can never outlive
    /// their task.
    ///
    /// # Returns
    ///
    /// `false` when no task with this ID exists.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        collaborator::delete_for_task(&mut tx, id).await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Fetches a single task's fields
    pub async fn find_detail(pool: &PgPool, id: Uuid) -> Result<Option<TaskDetail>, sqlx::Error> {
        let task = sqlx::query_as::<_, TaskDetail>(
            r#"
            SELECT title, description, status, due_date
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Counts tasks within a visibility scope
    pub async fn count(pool: &PgPool, visibility: &TaskVisibility) -> Result<i64, sqlx::Error> {
        let count = match visibility {
            TaskVisibility::All => {
                sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
                    .fetch_one(pool)
                    .await?
            }
            TaskVisibility::CreatedBy(user_id) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE created_by = $1")
                    .bind(user_id)
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(count)
    }

    /// Fetches one page of tasks joined with their creators
    pub async fn list_page(
        pool: &PgPool,
        visibility: &TaskVisibility,
        filter: &StatusFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TaskWithCreator>, sqlx::Error> {
        let tasks = page_query(visibility, filter, limit, offset)
            .build_query_as::<TaskWithCreator>()
            .fetch_all(pool)
            .await?;

        Ok(tasks)
    }
}
