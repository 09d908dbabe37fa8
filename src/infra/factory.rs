use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::{
    access_control::AccessControl, activity_logger::ActivityLogger, auth_service::AuthService,
};
use crate::infra::repositories::{
    postgres_activity_repo::PostgresActivityRepo, postgres_board_member_repo::PostgresBoardMemberRepo,
    postgres_board_repo::PostgresBoardRepo, postgres_card_repo::PostgresCardRepo,
    postgres_list_repo::PostgresListRepo, postgres_user_repo::PostgresUserRepo,
    postgres_workspace_member_repo::PostgresWorkspaceMemberRepo, postgres_workspace_repo::PostgresWorkspaceRepo,
    sqlite_activity_repo::SqliteActivityRepo, sqlite_board_member_repo::SqliteBoardMemberRepo,
    sqlite_board_repo::SqliteBoardRepo, sqlite_card_repo::SqliteCardRepo,
    sqlite_list_repo::SqliteListRepo, sqlite_user_repo::SqliteUserRepo,
    sqlite_workspace_member_repo::SqliteWorkspaceMemberRepo, sqlite_workspace_repo::SqliteWorkspaceRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let user_repo = Arc::new(PostgresUserRepo::new(pool.clone()));
        let workspace_member_repo = Arc::new(PostgresWorkspaceMemberRepo::new(pool.clone()));
        let board_member_repo = Arc::new(PostgresBoardMemberRepo::new(pool.clone()));
        let activity_repo = Arc::new(PostgresActivityRepo::new(pool.clone()));

        AppState {
            config: config.clone(),
            auth_service: Arc::new(AuthService::new(user_repo.clone(), config)),
            access: Arc::new(AccessControl::new(workspace_member_repo.clone(), board_member_repo.clone())),
            activity: Arc::new(ActivityLogger::new(activity_repo.clone())),
            user_repo,
            workspace_repo: Arc::new(PostgresWorkspaceRepo::new(pool.clone())),
            workspace_member_repo,
            board_repo: Arc::new(PostgresBoardRepo::new(pool.clone())),
            board_member_repo,
            list_repo: Arc::new(PostgresListRepo::new(pool.clone())),
            card_repo: Arc::new(PostgresCardRepo::new(pool.clone())),
            activity_repo,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let workspace_member_repo = Arc::new(SqliteWorkspaceMemberRepo::new(pool.clone()));
        let board_member_repo = Arc::new(SqliteBoardMemberRepo::new(pool.clone()));
        let activity_repo = Arc::new(SqliteActivityRepo::new(pool.clone()));

        AppState {
            config: config.clone(),
            auth_service: Arc::new(AuthService::new(user_repo.clone(), config)),
            access: Arc::new(AccessControl::new(workspace_member_repo.clone(), board_member_repo.clone())),
            activity: Arc::new(ActivityLogger::new(activity_repo.clone())),
            user_repo,
            workspace_repo: Arc::new(SqliteWorkspaceRepo::new(pool.clone())),
            workspace_member_repo,
            board_repo: Arc::new(SqliteBoardRepo::new(pool.clone())),
            board_member_repo,
            list_repo: Arc::new(SqliteListRepo::new(pool.clone())),
            card_repo: Arc::new(SqliteCardRepo::new(pool.clone())),
            activity_repo,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
