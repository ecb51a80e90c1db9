/// Collaborator association rows
///
/// A collaborator row links a task to a user. Rows have no identity of
/// their own: they are created alongside a task or during an edit,
/// replaced wholesale on every edit, and deleted with the task. The write
/// operations here take a `PgConnection` so the task operations can run
/// them inside their transactions.

use crate::models::user::UserSummary;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Builds the multi-row insert for a task's collaborator set
///
/// Uses the client's parameterized batch form, one `($n, $m)` tuple per
/// user. Callers must not pass an empty slice; `VALUES` with no tuples is
/// not valid SQL.
fn batch_insert_query(task_id: Uuid, user_ids: &[Uuid]) -> QueryBuilder<'_, Postgres> {
    debug_assert!(!user_ids.is_empty());

    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO collaborators (task_id, user_id) ");
    qb.push_values(user_ids.iter(), |mut row, user_id| {
        row.push_bind(task_id).push_bind(user_id);
    });
    qb
}

/// Inserts collaborator rows for a task
///
/// No-op when `user_ids` is empty; otherwise one batched multi-row
/// insert.
pub async fn insert_for_task(
    conn: &mut PgConnection,
    task_id: Uuid,
    user_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(());
    }

    batch_insert_query(task_id, user_ids)
        .build()
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Deletes all collaborator rows for a task
pub async fn delete_for_task(conn: &mut PgConnection, task_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM collaborators WHERE task_id = $1")
        .bind(task_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Lists a task's collaborators with their user details
pub async fn list_for_task(pool: &PgPool, task_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
    let users = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT users.id, users.first_name, users.last_name, users.email
        FROM collaborators
        JOIN users ON collaborators.user_id = users.id
        WHERE collaborators.task_id = $1
        ORDER BY users.first_name, users.id
        "#,
    )
    .bind(task_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}
