use taskflow_backend::{
    api::router::create_router,
    config::Config,
    domain::services::{
        access_control::AccessControl, activity_logger::ActivityLogger, auth_service::AuthService,
    },
    infra::repositories::{
        sqlite_activity_repo::SqliteActivityRepo, sqlite_board_member_repo::SqliteBoardMemberRepo,
        sqlite_board_repo::SqliteBoardRepo, sqlite_card_repo::SqliteCardRepo,
        sqlite_list_repo::SqliteListRepo, sqlite_user_repo::SqliteUserRepo,
        sqlite_workspace_member_repo::SqliteWorkspaceMemberRepo,
        sqlite_workspace_repo::SqliteWorkspaceRepo,
    },
    state::AppState,
};

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret-not-for-production".to_string(),
        };

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let workspace_member_repo = Arc::new(SqliteWorkspaceMemberRepo::new(pool.clone()));
        let board_member_repo = Arc::new(SqliteBoardMemberRepo::new(pool.clone()));
        let activity_repo = Arc::new(SqliteActivityRepo::new(pool.clone()));

        let state = Arc::new(AppState {
            auth_service: Arc::new(AuthService::new(user_repo.clone(), &config)),
            access: Arc::new(AccessControl::new(
                workspace_member_repo.clone(),
                board_member_repo.clone(),
            )),
            activity: Arc::new(ActivityLogger::new(activity_repo.clone())),
            config,
            user_repo,
            workspace_repo: Arc::new(SqliteWorkspaceRepo::new(pool.clone())),
            workspace_member_repo,
            board_repo: Arc::new(SqliteBoardRepo::new(pool.clone())),
            board_member_repo,
            list_repo: Arc::new(SqliteListRepo::new(pool.clone())),
            card_repo: Arc::new(SqliteCardRepo::new(pool.clone())),
            activity_repo,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    #[allow(dead_code)]
    pub async fn register(&self, first_name: &str, last_name: &str, email: &str, password: &str) -> Value {
        let response = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "firstName": first_name,
                    "lastName": last_name,
                    "email": email,
                    "password": password
                })),
            )
            .await;

        if !response.status().is_success() {
            panic!("Register failed in test helper: status {}", response.status());
        }
        parse_body(response).await
    }

    #[allow(dead_code)]
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let body = parse_body(response).await;
        body["token"].as_str().expect("No token in login response").to_string()
    }

    /// Registers a fresh user and returns (user_id, bearer token).
    #[allow(dead_code)]
    pub async fn register_and_login(&self, first_name: &str, last_name: &str, email: &str, password: &str) -> (String, String) {
        let registered = self.register(first_name, last_name, email, password).await;
        let user_id = registered["user"]["id"].as_str().unwrap().to_string();
        let token = self.login(email, password).await;
        (user_id, token)
    }

    #[allow(dead_code)]
    pub async fn create_workspace(&self, token: &str, name: &str) -> Value {
        let response = self
            .send("POST", "/api/workspaces", Some(token), Some(json!({ "name": name })))
            .await;
        assert_eq!(response.status(), 201, "workspace create failed");
        parse_body(response).await["workspace"].clone()
    }

    #[allow(dead_code)]
    pub async fn create_board(&self, token: &str, workspace_id: &str, title: &str) -> Value {
        let response = self
            .send(
                "POST",
                &format!("/api/workspaces/{workspace_id}/boards"),
                Some(token),
                Some(json!({ "title": title })),
            )
            .await;
        assert_eq!(response.status(), 201, "board create failed");
        parse_body(response).await["board"].clone()
    }

    #[allow(dead_code)]
    pub async fn create_list(&self, token: &str, board_id: &str, name: &str) -> Value {
        let response = self
            .send(
                "POST",
                &format!("/api/boards/{board_id}/lists"),
                Some(token),
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(response.status(), 201, "list create failed");
        parse_body(response).await["list"].clone()
    }

    #[allow(dead_code)]
    pub async fn create_card(&self, token: &str, list_id: &str, name: &str) -> Value {
        let response = self
            .send(
                "POST",
                &format!("/api/lists/{list_id}/cards"),
                Some(token),
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(response.status(), 201, "card create failed");
        parse_body(response).await["card"].clone()
    }
}

pub async fn parse_body(response: Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!(
            "Failed to parse JSON: {:?}. Status: {}. Body: {:?}",
            e,
            status,
            String::from_utf8_lossy(&bytes)
        ),
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
