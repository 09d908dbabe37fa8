use crate::domain::{
    models::activity::{ActivityLog, ActivityWithActor},
    ports::ActivityLogRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteActivityRepo {
    pool: SqlitePool,
}

impl SqliteActivityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for SqliteActivityRepo {
    async fn append(&self, entry: &ActivityLog) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO activity_log (id, actor_id, action, entity_type, entity_id, workspace_id, board_id, metadata, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
            .bind(&entry.id)
            .bind(&entry.actor_id)
            .bind(&entry.action)
            .bind(entry.entity_type.as_str())
            .bind(&entry.entity_id)
            .bind(&entry.workspace_id)
            .bind(&entry.board_id)
            .bind(&entry.metadata)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_for_board(&self, board_id: &str, limit: i64) -> Result<Vec<ActivityWithActor>, AppError> {
        sqlx::query_as::<_, ActivityWithActor>(
            "SELECT a.id, a.actor_id, a.action, a.entity_type, a.entity_id, a.metadata, a.created_at, u.first_name AS actor_first_name, u.last_name AS actor_last_name, u.email AS actor_email FROM activity_log a JOIN users u ON u.id = a.actor_id WHERE a.board_id = ? ORDER BY a.created_at DESC LIMIT ?",
        )
            .bind(board_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_workspace(&self, workspace_id: &str, limit: i64) -> Result<Vec<ActivityWithActor>, AppError> {
        sqlx::query_as::<_, ActivityWithActor>(
            "SELECT a.id, a.actor_id, a.action, a.entity_type, a.entity_id, a.metadata, a.created_at, u.first_name AS actor_first_name, u.last_name AS actor_last_name, u.email AS actor_email FROM activity_log a JOIN users u ON u.id = a.actor_id WHERE a.workspace_id = ? ORDER BY a.created_at DESC LIMIT ?",
        )
            .bind(workspace_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
