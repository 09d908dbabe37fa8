use crate::domain::{
    models::{board::Board, board_member::BoardMember},
    ports::BoardRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresBoardRepo {
    pool: PgPool,
}

impl PostgresBoardRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepo {
    async fn create_with_owner(&self, board: &Board, owner: &BoardMember) -> Result<Board, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Board>(
            "INSERT INTO boards (id, workspace_id, title, description, visibility, created_by, updated_by, is_deleted, deleted_at, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
            .bind(&board.id)
            .bind(&board.workspace_id)
            .bind(&board.title)
            .bind(&board.description)
            .bind(board.visibility.as_str())
            .bind(&board.created_by)
            .bind(&board.updated_by)
            .bind(board.is_deleted)
            .bind(board.deleted_at)
            .bind(board.created_at)
            .bind(board.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query(
            "INSERT INTO board_members (id, board_id, user_id, role, joined_at, added_by, updated_by, is_deleted, removed_by, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
            .bind(&owner.id)
            .bind(&owner.board_id)
            .bind(&owner.user_id)
            .bind(owner.role.as_str())
            .bind(owner.joined_at)
            .bind(&owner.added_by)
            .bind(&owner.updated_by)
            .bind(owner.is_deleted)
            .bind(&owner.removed_by)
            .bind(owner.created_at)
            .bind(owner.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<Board>, AppError> {
        sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1 AND is_deleted = FALSE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_workspace(&self, workspace_id: &str) -> Result<Vec<Board>, AppError> {
        sqlx::query_as::<_, Board>(
            "SELECT * FROM boards WHERE workspace_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC",
        )
            .bind(workspace_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn soft_delete(&self, id: &str, actor_id: &str) -> Result<(), AppError> {
        let now = Utc::now();
        sqlx::query("UPDATE boards SET is_deleted = TRUE, deleted_at = $1, updated_by = $2, updated_at = $3 WHERE id = $4")
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
