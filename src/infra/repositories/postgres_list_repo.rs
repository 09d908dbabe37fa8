use crate::domain::{models::list::List, ports::ListRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresListRepo {
    pool: PgPool,
}

impl PostgresListRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListRepository for PostgresListRepo {
    async fn create(&self, list: &List) -> Result<List, AppError> {
        // The scalar subquery makes append-order assignment a single atomic
        // statement; concurrent creates cannot both read the same max.
        sqlx::query_as::<_, List>(
            "INSERT INTO lists (id, board_id, name, \"order\", created_by, updated_by, is_deleted, deleted_at, created_at, updated_at) VALUES ($1, $2, $3, (SELECT COALESCE(MAX(\"order\"), 0) + 1 FROM lists WHERE board_id = $2 AND is_deleted = FALSE), $4, NULL, FALSE, NULL, $5, $6) RETURNING *",
        )
            .bind(&list.id)
            .bind(&list.board_id)
            .bind(&list.name)
            .bind(&list.created_by)
            .bind(list.created_at)
            .bind(list.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<List>, AppError> {
        sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1 AND is_deleted = FALSE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_board(&self, board_id: &str) -> Result<Vec<List>, AppError> {
        sqlx::query_as::<_, List>(
            "SELECT * FROM lists WHERE board_id = $1 AND is_deleted = FALSE ORDER BY \"order\" ASC, created_at ASC, id ASC",
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
                "UPDATE lists SET \"order\" = $1, updated_by = $2, updated_at = $3 WHERE id = $4 AND board_id = $5 AND is_deleted = FALSE",
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
        sqlx::query("UPDATE lists SET is_deleted = TRUE, deleted_at = $1, updated_by = $2, updated_at = $3 WHERE id = $4")
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
