/// Integration tests for the task endpoints
///
/// These verify the core subsystem end-to-end against a live database:
/// - create → get roundtrip with collaborators
/// - full collaborator replacement on edit
/// - delete removing association rows
/// - role-based list visibility, status filter, and pagination
/// - distinct not-found responses
/// - transactional rollback on partial failure

mod common;

use axum::http::StatusCode;
use common::{create_task_via_api, create_user, send, send_json, TestContext};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_task_then_get_returns_collaborators() {
    let ctx = TestContext::new().await.unwrap();

    let collab_a = create_user(&ctx.db, "member").await.unwrap();
    let collab_b = create_user(&ctx.db, "member").await.unwrap();

    let task_id = create_task_via_api(
        &ctx,
        "Write spec",
        "todo",
        ctx.member.id,
        &[collab_a.id, collab_b.id],
    )
    .await
    .unwrap();

    let (status, body) = send_json(&ctx.app, "GET", &format!("/task/{}", task_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Write spec");
    assert_eq!(body["status"], "todo");
    // Absent optional fields are omitted, not null
    assert!(body.get("description").is_none());
    assert!(body.get("dueDate").is_none());

    let collaborators = body["collaborators"].as_array().unwrap();
    assert_eq!(collaborators.len(), 2);

    let returned: Vec<String> = collaborators
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert!(returned.contains(&collab_a.id.to_string()));
    assert!(returned.contains(&collab_b.id.to_string()));

    // Each entry carries full user details
    for collaborator in collaborators {
        assert!(collaborator["firstName"].is_string());
        assert!(collaborator["lastName"].is_string());
        assert!(collaborator["email"].is_string());
    }

    ctx.cleanup(&[collab_a.id, collab_b.id]).await.unwrap();
}

#[tokio::test]
async fn test_create_task_with_due_date_roundtrips() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/task/create",
        Some(json!({
            "title": "Dated task",
            "description": "Has a deadline",
            "status": "inprogress",
            "createdBy": ctx.member.id,
            "dueDate": "2025-06-01",
            "collaborators": [],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let task_id = Uuid::parse_str(std::str::from_utf8(&body).unwrap()).unwrap();

    let (status, body) = send_json(&ctx.app, "GET", &format!("/task/{}", task_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dueDate"], "2025-06-01");
    assert_eq!(body["description"], "Has a deadline");
    assert_eq!(body["status"], "inprogress");

    ctx.cleanup(&[]).await.unwrap();
}

#[tokio::test]
async fn test_edit_task_replaces_collaborator_set() {
    let ctx = TestContext::new().await.unwrap();

    let keep = create_user(&ctx.db, "member").await.unwrap();
    let dropped = create_user(&ctx.db, "member").await.unwrap();
    let added = create_user(&ctx.db, "member").await.unwrap();

    let task_id = create_task_via_api(
        &ctx,
        "Collab churn",
        "todo",
        ctx.member.id,
        &[keep.id, dropped.id],
    )
    .await
    .unwrap();

    let (status, _) = send(
        &ctx.app,
        "PUT",
        "/task/edit",
        Some(json!({
            "id": task_id,
            "title": "Collab churn",
            "status": "inprogress",
            "collaborators": [keep.id, added.id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&ctx.app, "GET", &format!("/task/{}", task_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inprogress");

    // The old set is fully replaced: no union, no stale entries
    let returned: Vec<String> = body["collaborators"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(returned.len(), 2);
    assert!(returned.contains(&keep.id.to_string()));
    assert!(returned.contains(&added.id.to_string()));
    assert!(!returned.contains(&dropped.id.to_string()));

    ctx.cleanup(&[keep.id, dropped.id, added.id]).await.unwrap();
}

#[tokio::test]
async fn test_edit_task_can_clear_collaborators() {
    let ctx = TestContext::new().await.unwrap();

    let collab = create_user(&ctx.db, "member").await.unwrap();
    let task_id = create_task_via_api(&ctx, "Solo again", "todo", ctx.member.id, &[collab.id])
        .await
        .unwrap();

    let (status, _) = send(
        &ctx.app,
        "PUT",
        "/task/edit",
        Some(json!({
            "id": task_id,
            "title": "Solo again",
            "status": "todo",
            "collaborators": [],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&ctx.app, "GET", &format!("/task/{}", task_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collaborators"], json!([]));

    ctx.cleanup(&[collab.id]).await.unwrap();
}

#[tokio::test]
async fn test_delete_task_removes_collaborator_rows() {
    let ctx = TestContext::new().await.unwrap();

    let collab = create_user(&ctx.db, "member").await.unwrap();
    let task_id = create_task_via_api(&ctx, "Doomed", "todo", ctx.member.id, &[collab.id])
        .await
        .unwrap();

    let (status, _) = send(&ctx.app, "DELETE", &format!("/task/{}", task_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Subsequent fetch reports not-found
    let (status, _) = send(&ctx.app, "GET", &format!("/task/{}", task_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // And the association rows are gone
    let remaining: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM collaborators WHERE task_id = $1")
            .bind(task_id)
            .fetch_one(&ctx.db)
            .await
            .unwrap();
    assert_eq!(remaining, 0);

    ctx.cleanup(&[collab.id]).await.unwrap();
}

#[tokio::test]
async fn test_edit_missing_task_returns_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "PUT",
        "/task/edit",
        Some(json!({
            "id": Uuid::new_v4(),
            "title": "Ghost",
            "status": "todo",
            "collaborators": [],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    ctx.cleanup(&[]).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_task_returns_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = send(&ctx.app, "DELETE", &format!("/task/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup(&[]).await.unwrap();
}

#[tokio::test]
async fn test_list_tasks_member_sees_only_own() {
    let ctx = TestContext::new().await.unwrap();

    for i in 0..3 {
        create_task_via_api(&ctx, &format!("Member task {}", i), "todo", ctx.member.id, &[])
            .await
            .unwrap();
    }
    create_task_via_api(&ctx, "Admin task", "todo", ctx.admin.id, &[])
        .await
        .unwrap();

    // Member: total counts only self-created tasks
    let (status, body) = send_json(
        &ctx.app,
        "GET",
        &format!("/task/list?limit=10&userId={}", ctx.member.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    for row in body["data"].as_array().unwrap() {
        assert_eq!(row["creatorId"], ctx.member.id.to_string());
    }

    // Admin: total spans every creator (other tests may add more rows)
    let (status, body) = send_json(
        &ctx.app,
        "GET",
        &format!("/task/list?limit=10&userId={}", ctx.admin.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["total"].as_i64().unwrap() >= 4);

    ctx.cleanup(&[]).await.unwrap();
}

#[tokio::test]
async fn test_list_tasks_status_filter() {
    let ctx = TestContext::new().await.unwrap();

    create_task_via_api(&ctx, "A", "todo", ctx.member.id, &[]).await.unwrap();
    create_task_via_api(&ctx, "B", "todo", ctx.member.id, &[]).await.unwrap();
    create_task_via_api(&ctx, "C", "done", ctx.member.id, &[]).await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "GET",
        &format!("/task/list?limit=10&status=done&userId={}", ctx.member.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["status"], "done");
    assert_eq!(data[0]["title"], "C");

    // The total respects visibility, not the status filter
    assert_eq!(body["total"], 3);

    ctx.cleanup(&[]).await.unwrap();
}

#[tokio::test]
async fn test_list_tasks_pagination_is_stable() {
    let ctx = TestContext::new().await.unwrap();

    for i in 0..5 {
        create_task_via_api(&ctx, &format!("Page task {}", i), "todo", ctx.member.id, &[])
            .await
            .unwrap();
    }

    let (status, first) = send_json(
        &ctx.app,
        "GET",
        &format!("/task/list?limit=2&userId={}", ctx.member.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["limit"], 2);
    assert_eq!(first["offset"], 0);
    assert_eq!(first["total"], 5);
    assert_eq!(first["data"].as_array().unwrap().len(), 2);

    let (status, second) = send_json(
        &ctx.app,
        "GET",
        &format!("/task/list?limit=2&offset=2&userId={}", ctx.member.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data"].as_array().unwrap().len(), 2);

    // Stable ordering: pages never overlap
    let page_ids = |page: &serde_json::Value| -> Vec<String> {
        page["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_str().unwrap().to_string())
            .collect()
    };
    for id in page_ids(&second) {
        assert!(!page_ids(&first).contains(&id));
    }

    ctx.cleanup(&[]).await.unwrap();
}

#[tokio::test]
async fn test_list_tasks_unknown_user_returns_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "GET",
        &format!("/task/list?limit=10&userId={}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    ctx.cleanup(&[]).await.unwrap();
}

#[tokio::test]
async fn test_create_task_validation_errors_are_structured() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(
        &ctx.app,
        "POST",
        "/task/create",
        Some(json!({
            "title": "",
            "status": "archived",
            "createdBy": ctx.member.id,
            "collaborators": [],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let details = body["details"].as_array().unwrap();
    let fields: Vec<&str> = details
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"status"));

    ctx.cleanup(&[]).await.unwrap();
}

#[tokio::test]
async fn test_create_task_rolls_back_on_bad_collaborator() {
    let ctx = TestContext::new().await.unwrap();

    let title = format!("Orphan probe {}", Uuid::new_v4());
    let (status, _) = send(
        &ctx.app,
        "POST",
        "/task/create",
        Some(json!({
            "title": title,
            "status": "todo",
            "createdBy": ctx.member.id,
            // References no existing user, so the batch insert fails
            "collaborators": [Uuid::new_v4()],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // The whole operation rolled back: no orphan task row
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE title = $1")
        .bind(&title)
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(orphans, 0);

    ctx.cleanup(&[]).await.unwrap();
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send_json(&ctx.app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    ctx.cleanup(&[]).await.unwrap();
}
