use crate::domain::{models::list::List, ports::ListRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteListRepo {
    pool: SqlitePool,
}

impl SqliteListRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListRepository for SqliteListRepo {
    async fn create(&self, list: &List) -> Result<List, AppError> {
        // The scalar subquery makes append-order assignment a single atomic
        // statement; concurrent creates cannot both read the same max.
        sqlx::query_as::<_, List>(
            "INSERT INTO lists (id, board_id, name, \"order\", created_by, updated_by, is_deleted, deleted_at, created_at, updated_at) VALUES (?, ?, ?, (SELECT COALESCE(MAX(\"order\"), 0) + 1 FROM lists WHERE board_id = ? AND is_deleted = 0), ?, NULL, 0, NULL, ?, ?) RETURNING *",
        )
            .bind(&list.id)
            .bind(&list.board_id)
            .bind(&list.name)
            .bind(&list.board_id)
            .bind(&list.created_by)
            .bind(list.created_at)
            .bind(list.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<List>, AppError> {
        sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = ? AND is_deleted = 0")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_board(&self, board_id: &str) -> Result<Vec<List>, AppError> {
        sqlx::query_as::<_, List>(
            "SELECT * FROM lists WHERE board_id = ? AND is_deleted = 0 ORDER BY \"order\" ASC, created_at ASC, id ASC",
        )
            .bind(board_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn reorder(&self, board_id: &str, ordered_ids: &[String], updated_by: &str) -> Result<(), AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        for (position, id) in ordered_ids.iter().enumerate() {
            // Ids not belonging to this board (or already deleted) match no
            // row and are silently skipped.
            sqlx::query(
                "UPDATE lists SET \"order\" = ?, updated_by = ?, updated_at = ? WHERE id = ? AND board_id = ? AND is_deleted = 0",
            )
                .bind((position + 1) as i64)
                .bind(updated_by)
                .bind(now)
                .bind(id)
                .bind(board_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn soft_delete(&self, id: &str, actor_id: &str) -> Result<(), AppError> {
        let now = Utc::now();
        sqlx::query("UPDATE lists SET is_deleted = 1, deleted_at = ?, updated_by = ?, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(actor_id)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
