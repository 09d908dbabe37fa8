mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};

async fn list_names_and_orders(app: &TestApp, token: &str, board_id: &str) -> Vec<(String, i64)> {
    let body = parse_body(
        app.send("GET", &format!("/api/boards/{board_id}/lists"), Some(token), None)
            .await,
    )
    .await;
    body["lists"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| (l["name"].as_str().unwrap().to_string(), l["order"].as_i64().unwrap()))
        .collect()
}

async fn card_names(app: &TestApp, token: &str, list_id: &str) -> Vec<String> {
    let body = parse_body(
        app.send("GET", &format!("/api/lists/{list_id}/cards"), Some(token), None)
            .await,
    )
    .await;
    body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_append_assigns_dense_orders() {
    let app = TestApp::new().await;
    let (_u1, token) = app.register_and_login("Alice", "Doe", "alice@example.com", "password123").await;
    let workspace = app.create_workspace(&token, "Acme").await;
    let board = app.create_board(&token, workspace["id"].as_str().unwrap(), "Sprint").await;
    let board_id = board["id"].as_str().unwrap();

    let a = app.create_list(&token, board_id, "Todo").await;
    let b = app.create_list(&token, board_id, "Doing").await;
    let c = app.create_list(&token, board_id, "Done").await;
    assert_eq!(a["order"], 1);
    assert_eq!(b["order"], 2);
    assert_eq!(c["order"], 3);

    // Deleting a middle list leaves a gap; no compaction happens, and the
    // next append still goes to max + 1.
    let b_id = b["id"].as_str().unwrap();
    let deleted = app.send("DELETE", &format!("/api/lists/{b_id}"), Some(&token), None).await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let d = app.create_list(&token, board_id, "Blocked").await;
    assert_eq!(d["order"], 4);

    let lists = list_names_and_orders(&app, &token, board_id).await;
    assert_eq!(
        lists,
        vec![
            ("Todo".to_string(), 1),
            ("Done".to_string(), 3),
            ("Blocked".to_string(), 4)
        ]
    );
}

#[tokio::test]
async fn test_bulk_reorder_lists() {
    let app = TestApp::new().await;
    let (_u1, token) = app.register_and_login("Alice", "Doe", "alice@example.com", "password123").await;
    let workspace = app.create_workspace(&token, "Acme").await;
    let board = app.create_board(&token, workspace["id"].as_str().unwrap(), "Sprint").await;
    let board_id = board["id"].as_str().unwrap();

    let a = app.create_list(&token, board_id, "A").await;
    let b = app.create_list(&token, board_id, "B").await;
    let c = app.create_list(&token, board_id, "C").await;
    let (a_id, b_id, c_id) = (
        a["id"].as_str().unwrap(),
        b["id"].as_str().unwrap(),
        c["id"].as_str().unwrap(),
    );

    // [C, A, B] must yield exactly C=1, A=2, B=3.
    let reordered = app
        .send(
            "PUT",
            &format!("/api/boards/{board_id}/lists/reorder"),
            Some(&token),
            Some(json!({ "orderedListIds": [c_id, a_id, b_id] })),
        )
        .await;
    assert_eq!(reordered.status(), StatusCode::OK);

    let lists = list_names_and_orders(&app, &token, board_id).await;
    assert_eq!(
        lists,
        vec![("C".to_string(), 1), ("A".to_string(), 2), ("B".to_string(), 3)]
    );

    // Unknown ids in the sequence are skipped without failing; positions
    // still count them.
    let with_bogus = app
        .send(
            "PUT",
            &format!("/api/boards/{board_id}/lists/reorder"),
            Some(&token),
            Some(json!({ "orderedListIds": [c_id, "not-a-list", a_id, b_id] })),
        )
        .await;
    assert_eq!(with_bogus.status(), StatusCode::OK);

    let lists = list_names_and_orders(&app, &token, board_id).await;
    assert_eq!(
        lists,
        vec![("C".to_string(), 1), ("A".to_string(), 3), ("B".to_string(), 4)]
    );

    // A partial sequence touches only the supplied ids; omitted lists keep
    // stale orders, and ties resolve by creation time.
    let partial = app
        .send(
            "PUT",
            &format!("/api/boards/{board_id}/lists/reorder"),
            Some(&token),
            Some(json!({ "orderedListIds": [b_id] })),
        )
        .await;
    assert_eq!(partial.status(), StatusCode::OK);

    let lists = list_names_and_orders(&app, &token, board_id).await;
    // B=1 now ties with C=1; B was created first and wins the tie-break.
    assert_eq!(
        lists,
        vec![("B".to_string(), 1), ("C".to_string(), 1), ("A".to_string(), 3)]
    );
}

#[tokio::test]
async fn test_card_append_and_cross_list_move() {
    let app = TestApp::new().await;
    let (_u1, token) = app.register_and_login("Alice", "Doe", "alice@example.com", "password123").await;
    let workspace = app.create_workspace(&token, "Acme").await;
    let board = app.create_board(&token, workspace["id"].as_str().unwrap(), "Sprint").await;
    let board_id = board["id"].as_str().unwrap();

    let l1 = app.create_list(&token, board_id, "Todo").await;
    let l2 = app.create_list(&token, board_id, "Done").await;
    let (l1_id, l2_id) = (l1["id"].as_str().unwrap(), l2["id"].as_str().unwrap());

    let c1 = app.create_card(&token, l1_id, "One").await;
    let c2 = app.create_card(&token, l1_id, "Two").await;
    let c3 = app.create_card(&token, l1_id, "Three").await;
    assert_eq!(c1["order"], 1);
    assert_eq!(c2["order"], 2);
    assert_eq!(c3["order"], 3);

    // Move card three into the head of the other list.
    let c3_id = c3["id"].as_str().unwrap();
    let moved = app
        .send(
            "PATCH",
            &format!("/api/cards/{c3_id}/move"),
            Some(&token),
            Some(json!({ "listId": l2_id, "order": 1 })),
        )
        .await;
    assert_eq!(moved.status(), StatusCode::OK);

    assert_eq!(card_names(&app, &token, l2_id).await, vec!["Three"]);
    assert_eq!(card_names(&app, &token, l1_id).await, vec!["One", "Two"]);

    // A second move into the same slot produces a tie; the engine does not
    // re-index, and readers fall back to creation time.
    let c1_id = c1["id"].as_str().unwrap();
    let moved = app
        .send(
            "PATCH",
            &format!("/api/cards/{c1_id}/move"),
            Some(&token),
            Some(json!({ "listId": l2_id, "order": 1 })),
        )
        .await;
    assert_eq!(moved.status(), StatusCode::OK);

    assert_eq!(card_names(&app, &token, l2_id).await, vec!["One", "Three"]);

    // Repeated reads are deterministic.
    assert_eq!(card_names(&app, &token, l2_id).await, vec!["One", "Three"]);
}

#[tokio::test]
async fn test_move_card_validation_and_authorization() {
    let app = TestApp::new().await;
    let (_u1, token1) = app.register_and_login("Alice", "Doe", "alice@example.com", "password123").await;
    let (_u2, token2) = app.register_and_login("Bob", "Doe", "bob@example.com", "password123").await;

    let workspace = app.create_workspace(&token1, "Acme").await;
    let board = app.create_board(&token1, workspace["id"].as_str().unwrap(), "Sprint").await;
    let board_id = board["id"].as_str().unwrap();
    let list = app.create_list(&token1, board_id, "Todo").await;
    let list_id = list["id"].as_str().unwrap();
    let card = app.create_card(&token1, list_id, "One").await;
    let card_id = card["id"].as_str().unwrap();

    let bad_order = app
        .send(
            "PATCH",
            &format!("/api/cards/{card_id}/move"),
            Some(&token1),
            Some(json!({ "listId": list_id, "order": 0 })),
        )
        .await;
    assert_eq!(bad_order.status(), StatusCode::BAD_REQUEST);

    let missing_list = app
        .send(
            "PATCH",
            &format!("/api/cards/{card_id}/move"),
            Some(&token1),
            Some(json!({ "listId": "no-such-list", "order": 1 })),
        )
        .await;
    assert_eq!(missing_list.status(), StatusCode::NOT_FOUND);

    let not_a_member = app
        .send(
            "PATCH",
            &format!("/api/cards/{card_id}/move"),
            Some(&token2),
            Some(json!({ "listId": list_id, "order": 1 })),
        )
        .await;
    assert_eq!(not_a_member.status(), StatusCode::FORBIDDEN);

    // Deleted cards are invisible to moves.
    let deleted = app
        .send("DELETE", &format!("/api/cards/{card_id}"), Some(&token1), None)
        .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let move_deleted = app
        .send(
            "PATCH",
            &format!("/api/cards/{card_id}/move"),
            Some(&token1),
            Some(json!({ "listId": list_id, "order": 1 })),
        )
        .await;
    assert_eq!(move_deleted.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_soft_deleted_card_and_list_visibility() {
    let app = TestApp::new().await;
    let (_u1, token) = app.register_and_login("Alice", "Doe", "alice@example.com", "password123").await;
    let workspace = app.create_workspace(&token, "Acme").await;
    let board = app.create_board(&token, workspace["id"].as_str().unwrap(), "Sprint").await;
    let board_id = board["id"].as_str().unwrap();
    let list = app.create_list(&token, board_id, "Todo").await;
    let list_id = list["id"].as_str().unwrap();

    let card = app.create_card(&token, list_id, "One").await;
    let keep = app.create_card(&token, list_id, "Two").await;
    let card_id = card["id"].as_str().unwrap();

    let deleted = app
        .send("DELETE", &format!("/api/cards/{card_id}"), Some(&token), None)
        .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let remaining = card_names(&app, &token, list_id).await;
    assert_eq!(remaining, vec!["Two"]);
    let _ = keep;

    // deleted_by / deleted_at are stamped while the row persists.
    let row: (bool, Option<String>) =
        sqlx::query_as("SELECT is_deleted, deleted_by FROM cards WHERE id = ?")
            .bind(card_id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(row.0);
    assert!(row.1.is_some());

    // Deleting the list hides its cards from traversal without touching them.
    let deleted_list = app
        .send("DELETE", &format!("/api/lists/{list_id}"), Some(&token), None)
        .await;
    assert_eq!(deleted_list.status(), StatusCode::OK);

    let cards_of_deleted_list = app
        .send("GET", &format!("/api/lists/{list_id}/cards"), Some(&token), None)
        .await;
    assert_eq!(cards_of_deleted_list.status(), StatusCode::NOT_FOUND);

    let untouched: (bool,) = sqlx::query_as("SELECT is_deleted FROM cards WHERE name = 'Two'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert!(!untouched.0, "no cascade: remaining card rows stay active");

    let lists: Vec<Value> = parse_body(
        app.send("GET", &format!("/api/boards/{board_id}/lists"), Some(&token), None)
            .await,
    )
    .await["lists"]
        .as_array()
        .unwrap()
        .clone();
    assert!(lists.is_empty());
}
