use crate::domain::{
    models::board_member::{BoardMember, BoardMemberWithUser, BoardRole},
    ports::BoardMemberRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresBoardMemberRepo {
    pool: PgPool,
}

impl PostgresBoardMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoardMemberRepository for PostgresBoardMemberRepo {
    async fn find_active(&self, board_id: &str, user_id: &str) -> Result<Option<BoardMember>, AppError> {
        sqlx::query_as::<_, BoardMember>(
            "SELECT * FROM board_members WHERE board_id = $1 AND user_id = $2 AND is_deleted = FALSE",
        )
            .bind(board_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_with_users(&self, board_id: &str) -> Result<Vec<BoardMemberWithUser>, AppError> {
        sqlx::query_as::<_, BoardMemberWithUser>(
            "SELECT m.id, m.board_id, m.user_id, m.role, m.joined_at, u.email, u.first_name, u.last_name FROM board_members m JOIN users u ON u.id = m.user_id WHERE m.board_id = $1 AND m.is_deleted = FALSE ORDER BY m.joined_at ASC",
        )
            .bind(board_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, member: &BoardMember) -> Result<BoardMember, AppError> {
        sqlx::query_as::<_, BoardMember>(
            "INSERT INTO board_members (id, board_id, user_id, role, joined_at, added_by, updated_by, is_deleted, removed_by, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
            .bind(&member.id)
            .bind(&member.board_id)
            .bind(&member.user_id)
            .bind(member.role.as_str())
            .bind(member.joined_at)
            .bind(&member.added_by)
            .bind(&member.updated_by)
            .bind(member.is_deleted)
            .bind(&member.removed_by)
            .bind(member.created_at)
            .bind(member.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_role(&self, id: &str, role: BoardRole, updated_by: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE board_members SET role = $1, updated_by = $2, updated_at = $3 WHERE id = $4")
            .bind(role.as_str())
            .bind(updated_by)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn soft_delete(&self, id: &str, removed_by: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE board_members SET is_deleted = TRUE, removed_by = $1, updated_at = $2 WHERE id = $3")
            .bind(removed_by)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
