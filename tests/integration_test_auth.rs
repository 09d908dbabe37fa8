mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_register_login_me() {
    let app = TestApp::new().await;

    let registered = app.register("Alice", "Doe", "alice@example.com", "password123").await;
    assert_eq!(registered["user"]["email"], "alice@example.com");
    assert_eq!(registered["user"]["role"], "user");
    assert!(registered["user"]["passwordHash"].is_null());

    // Duplicate email
    let duplicate = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Alice",
                "lastName": "Again",
                "email": "alice@example.com",
                "password": "password123"
            })),
        )
        .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    // Email matching is case-insensitive
    let duplicate_upper = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Alice",
                "lastName": "Upper",
                "email": "ALICE@Example.com",
                "password": "password123"
            })),
        )
        .await;
    assert_eq!(duplicate_upper.status(), StatusCode::CONFLICT);

    let token = app.login("alice@example.com", "password123").await;

    let me = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me.status(), StatusCode::OK);
    let me_body = parse_body(me).await;
    assert_eq!(me_body["user"]["email"], "alice@example.com");
    assert_eq!(me_body["user"]["firstName"], "Alice");

    let unauthenticated = app.send("GET", "/api/auth/me", None, None).await;
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let bad_token = app.send("GET", "/api/auth/me", Some("not-a-jwt"), None).await;
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let missing = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "",
                "lastName": "Doe",
                "email": "x@example.com",
                "password": "password123"
            })),
        )
        .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let short_password = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Bob",
                "lastName": "Doe",
                "email": "bob@example.com",
                "password": "abc"
            })),
        )
        .await;
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;
    app.register("Carol", "Doe", "carol@example.com", "password123").await;

    let wrong = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "carol@example.com", "password": "wrong" })),
        )
        .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lockout_after_five_failed_attempts() {
    let app = TestApp::new().await;
    app.register("Dave", "Doe", "dave@example.com", "password123").await;

    // Five consecutive failures arm the lockout.
    for _ in 0..5 {
        let response = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "dave@example.com", "password": "wrong" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // The sixth attempt fails even with the correct password.
    let locked = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "dave@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(locked.status(), StatusCode::FORBIDDEN);

    // After the window elapses, a correct password works and resets the
    // counters. The window is rewound directly in the store.
    sqlx::query("UPDATE users SET lockout_until = datetime('now', '-1 minute') WHERE email = ?")
        .bind("dave@example.com")
        .execute(&app.pool)
        .await
        .unwrap();

    let token = app.login("dave@example.com", "password123").await;
    assert!(!token.is_empty());

    let user: (i64, Option<String>) =
        sqlx::query_as("SELECT failed_attempts, lockout_until FROM users WHERE email = ?")
            .bind("dave@example.com")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(user.0, 0);
    assert!(user.1.is_none());
}

#[tokio::test]
async fn test_failed_attempts_reset_on_success() {
    let app = TestApp::new().await;
    app.register("Erin", "Doe", "erin@example.com", "password123").await;

    for _ in 0..4 {
        let response = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "erin@example.com", "password": "wrong" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // A success on the fifth attempt resets the counter; no lockout.
    app.login("erin@example.com", "password123").await;

    for _ in 0..4 {
        let response = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "erin@example.com", "password": "wrong" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let token = app.login("erin@example.com", "password123").await;
    assert!(!token.is_empty());
}
