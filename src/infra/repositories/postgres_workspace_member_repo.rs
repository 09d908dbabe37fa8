use crate::domain::{
    models::workspace_member::{WorkspaceMember, WorkspaceMemberWithUser, WorkspaceRole},
    ports::WorkspaceMemberRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresWorkspaceMemberRepo {
    pool: PgPool,
}

impl PostgresWorkspaceMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceMemberRepository for PostgresWorkspaceMemberRepo {
    async fn find_active(&self, workspace_id: &str, user_id: &str) -> Result<Option<WorkspaceMember>, AppError> {
        sqlx::query_as::<_, WorkspaceMember>(
            "SELECT * FROM workspace_members WHERE workspace_id = $1 AND user_id = $2 AND is_deleted = FALSE",
        )
            .bind(workspace_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_any(&self, workspace_id: &str, user_id: &str) -> Result<Option<WorkspaceMember>, AppError> {
        sqlx::query_as::<_, WorkspaceMember>(
            "SELECT * FROM workspace_members WHERE workspace_id = $1 AND user_id = $2",
        )
            .bind(workspace_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_with_users(&self, workspace_id: &str) -> Result<Vec<WorkspaceMemberWithUser>, AppError> {
        sqlx::query_as::<_, WorkspaceMemberWithUser>(
            "SELECT m.id, m.workspace_id, m.user_id, m.role, m.joined_at, u.email, u.first_name, u.last_name FROM workspace_members m JOIN users u ON u.id = m.user_id WHERE m.workspace_id = $1 AND m.is_deleted = FALSE ORDER BY m.joined_at ASC",
        )
            .bind(workspace_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, member: &WorkspaceMember) -> Result<WorkspaceMember, AppError> {
        sqlx::query_as::<_, WorkspaceMember>(
            "INSERT INTO workspace_members (id, workspace_id, user_id, role, joined_at, added_by, is_deleted, removed_by, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
            .bind(&member.id)
            .bind(&member.workspace_id)
            .bind(&member.user_id)
            .bind(member.role.as_str())
            .bind(member.joined_at)
            .bind(&member.added_by)
            .bind(member.is_deleted)
            .bind(&member.removed_by)
            .bind(member.created_at)
            .bind(member.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn reactivate(&self, id: &str, role: WorkspaceRole, added_by: &str) -> Result<WorkspaceMember, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, WorkspaceMember>(
            "UPDATE workspace_members SET is_deleted = FALSE, role = $1, added_by = $2, removed_by = NULL, joined_at = $3, updated_at = $4 WHERE id = $5 RETURNING *",
        )
            .bind(role.as_str())
            .bind(added_by)
            .bind(now)
            .bind(now)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_role(&self, id: &str, role: WorkspaceRole) -> Result<(), AppError> {
        sqlx::query("UPDATE workspace_members SET role = $1, updated_at = $2 WHERE id = $3")
            .bind(role.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn soft_delete(&self, id: &str, removed_by: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE workspace_members SET is_deleted = TRUE, removed_by = $1, updated_at = $2 WHERE id = $3")
            .bind(removed_by)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
