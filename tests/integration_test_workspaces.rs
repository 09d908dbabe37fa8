mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_create_and_list_workspaces() {
    let app = TestApp::new().await;
    let (_u1, token1) = app.register_and_login("Alice", "Doe", "alice@example.com", "password123").await;
    let (_u2, token2) = app.register_and_login("Bob", "Doe", "bob@example.com", "password123").await;

    let missing_name = app
        .send("POST", "/api/workspaces", Some(&token1), Some(json!({ "name": "  " })))
        .await;
    assert_eq!(missing_name.status(), StatusCode::BAD_REQUEST);

    let workspace = app.create_workspace(&token1, "Acme").await;
    assert_eq!(workspace["name"], "Acme");

    let mine = parse_body(app.send("GET", "/api/workspaces", Some(&token1), None).await).await;
    assert_eq!(mine["workspaces"].as_array().unwrap().len(), 1);

    // Memberships scope the listing; Bob sees nothing.
    let theirs = parse_body(app.send("GET", "/api/workspaces", Some(&token2), None).await).await;
    assert_eq!(theirs["workspaces"].as_array().unwrap().len(), 0);

    // The creator is auto-inserted as the owner member.
    let ws_id = workspace["id"].as_str().unwrap();
    let members = parse_body(
        app.send("GET", &format!("/api/workspaces/{ws_id}/members"), Some(&token1), None)
            .await,
    )
    .await;
    let members = members["members"].as_array().unwrap().clone();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["role"], "owner");
}

#[tokio::test]
async fn test_invite_remove_and_reactivate_member() {
    let app = TestApp::new().await;
    let (_u1, token1) = app.register_and_login("Alice", "Doe", "alice@example.com", "password123").await;
    let (u2, token2) = app.register_and_login("Bob", "Doe", "bob@example.com", "password123").await;
    let (_u3, _) = app.register_and_login("Carol", "Doe", "carol@example.com", "password123").await;

    let workspace = app.create_workspace(&token1, "Acme").await;
    let ws_id = workspace["id"].as_str().unwrap();

    // Invite Bob as plain member.
    let invited = app
        .send(
            "POST",
            &format!("/api/workspaces/{ws_id}/invite"),
            Some(&token1),
            Some(json!({ "email": "bob@example.com" })),
        )
        .await;
    assert_eq!(invited.status(), StatusCode::CREATED);
    let first_membership_id = parse_body(invited).await["member"]["id"].as_str().unwrap().to_string();

    // An active membership cannot be invited again.
    let again = app
        .send(
            "POST",
            &format!("/api/workspaces/{ws_id}/invite"),
            Some(&token1),
            Some(json!({ "email": "bob@example.com" })),
        )
        .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    // Plain members may not invite.
    let forbidden = app
        .send(
            "POST",
            &format!("/api/workspaces/{ws_id}/invite"),
            Some(&token2),
            Some(json!({ "email": "carol@example.com" })),
        )
        .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    // Unknown target email.
    let unknown = app
        .send(
            "POST",
            &format!("/api/workspaces/{ws_id}/invite"),
            Some(&token1),
            Some(json!({ "email": "ghost@example.com" })),
        )
        .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    // Remove Bob.
    let removed = app
        .send(
            "DELETE",
            &format!("/api/workspaces/{ws_id}/members/{u2}"),
            Some(&token1),
            None,
        )
        .await;
    assert_eq!(removed.status(), StatusCode::OK);

    // A retried removal sees no active membership.
    let removed_again = app
        .send(
            "DELETE",
            &format!("/api/workspaces/{ws_id}/members/{u2}"),
            Some(&token1),
            None,
        )
        .await;
    assert_eq!(removed_again.status(), StatusCode::NOT_FOUND);

    let members = parse_body(
        app.send("GET", &format!("/api/workspaces/{ws_id}/members"), Some(&token1), None)
            .await,
    )
    .await;
    assert_eq!(members["members"].as_array().unwrap().len(), 1);

    // Re-inviting reactivates the same record with the new role instead of
    // colliding with the (workspace, user) uniqueness constraint.
    let reinvited = app
        .send(
            "POST",
            &format!("/api/workspaces/{ws_id}/invite"),
            Some(&token1),
            Some(json!({ "email": "bob@example.com", "role": "admin" })),
        )
        .await;
    assert_eq!(reinvited.status(), StatusCode::CREATED);
    let reactivated = parse_body(reinvited).await;
    assert_eq!(reactivated["member"]["id"], first_membership_id.as_str());
    assert_eq!(reactivated["member"]["role"], "admin");
    assert!(reactivated["member"]["removedBy"].is_null());

    // Exactly one membership row exists for the pair.
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM workspace_members WHERE workspace_id = ? AND user_id = ?")
            .bind(ws_id)
            .bind(&u2)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(count.0, 1);
}

#[tokio::test]
async fn test_owner_protection_and_role_changes() {
    let app = TestApp::new().await;
    let (u1, token1) = app.register_and_login("Alice", "Doe", "alice@example.com", "password123").await;
    let (u2, token2) = app.register_and_login("Bob", "Doe", "bob@example.com", "password123").await;

    let workspace = app.create_workspace(&token1, "Acme").await;
    let ws_id = workspace["id"].as_str().unwrap();

    let invited = app
        .send(
            "POST",
            &format!("/api/workspaces/{ws_id}/invite"),
            Some(&token1),
            Some(json!({ "email": "bob@example.com", "role": "admin" })),
        )
        .await;
    assert_eq!(invited.status(), StatusCode::CREATED);

    // The owner can never be removed, even by an admin.
    let remove_owner = app
        .send(
            "DELETE",
            &format!("/api/workspaces/{ws_id}/members/{u1}"),
            Some(&token2),
            None,
        )
        .await;
    assert_eq!(remove_owner.status(), StatusCode::BAD_REQUEST);

    // Nor can the owner's role be changed.
    let demote_owner = app
        .send(
            "PATCH",
            &format!("/api/workspaces/{ws_id}/members/{u1}"),
            Some(&token2),
            Some(json!({ "role": "member" })),
        )
        .await;
    assert_eq!(demote_owner.status(), StatusCode::BAD_REQUEST);

    // Ownership is not grantable through role changes.
    let promote_to_owner = app
        .send(
            "PATCH",
            &format!("/api/workspaces/{ws_id}/members/{u2}"),
            Some(&token1),
            Some(json!({ "role": "owner" })),
        )
        .await;
    assert_eq!(promote_to_owner.status(), StatusCode::BAD_REQUEST);

    // Admins may change other members' roles (workspace scope).
    let demote = app
        .send(
            "PATCH",
            &format!("/api/workspaces/{ws_id}/members/{u2}"),
            Some(&token1),
            Some(json!({ "role": "member" })),
        )
        .await;
    assert_eq!(demote.status(), StatusCode::OK);

    // Workspace deletion is reserved for the owner.
    let delete_by_member = app
        .send("DELETE", &format!("/api/workspaces/{ws_id}"), Some(&token2), None)
        .await;
    assert_eq!(delete_by_member.status(), StatusCode::FORBIDDEN);

    let delete_by_owner = app
        .send("DELETE", &format!("/api/workspaces/{ws_id}"), Some(&token1), None)
        .await;
    assert_eq!(delete_by_owner.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_soft_deleted_workspace_is_invisible() {
    let app = TestApp::new().await;
    let (_u1, token1) = app.register_and_login("Alice", "Doe", "alice@example.com", "password123").await;
    let (_u2, _) = app.register_and_login("Bob", "Doe", "bob@example.com", "password123").await;

    let workspace = app.create_workspace(&token1, "Acme").await;
    let ws_id = workspace["id"].as_str().unwrap();

    let deleted = app
        .send("DELETE", &format!("/api/workspaces/{ws_id}"), Some(&token1), None)
        .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    // The record persists, but nothing exposes it.
    let row: (bool,) = sqlx::query_as("SELECT is_deleted FROM workspaces WHERE id = ?")
        .bind(ws_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert!(row.0);

    let listed = parse_body(app.send("GET", "/api/workspaces", Some(&token1), None).await).await;
    assert_eq!(listed["workspaces"].as_array().unwrap().len(), 0);

    let members = app
        .send("GET", &format!("/api/workspaces/{ws_id}/members"), Some(&token1), None)
        .await;
    assert_eq!(members.status(), StatusCode::NOT_FOUND);

    let invite = app
        .send(
            "POST",
            &format!("/api/workspaces/{ws_id}/invite"),
            Some(&token1),
            Some(json!({ "email": "bob@example.com" })),
        )
        .await;
    assert_eq!(invite.status(), StatusCode::NOT_FOUND);

    let delete_again = app
        .send("DELETE", &format!("/api/workspaces/{ws_id}"), Some(&token1), None)
        .await;
    assert_eq!(delete_again.status(), StatusCode::NOT_FOUND);
}
