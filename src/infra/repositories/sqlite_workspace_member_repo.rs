use crate::domain::{
    models::workspace_member::{WorkspaceMember, WorkspaceMemberWithUser, WorkspaceRole},
    ports::WorkspaceMemberRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteWorkspaceMemberRepo {
    pool: SqlitePool,
}

impl SqliteWorkspaceMemberRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceMemberRepository for SqliteWorkspaceMemberRepo {
    async fn find_active(&self, workspace_id: &str, user_id: &str) -> Result<Option<WorkspaceMember>, AppError> {
        sqlx::query_as::<_, WorkspaceMember>(
            "SELECT * FROM workspace_members WHERE workspace_id = ? AND user_id = ? AND is_deleted = 0",
        )
            .bind(workspace_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_any(&self, workspace_id: &str, user_id: &str) -> Result<Option<WorkspaceMember>, AppError> {
        sqlx::query_as::<_, WorkspaceMember>(
            "SELECT * FROM workspace_members WHERE workspace_id = ? AND user_id = ?",
        )
            .bind(workspace_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_with_users(&self, workspace_id: &str) -> Result<Vec<WorkspaceMemberWithUser>, AppError> {
        sqlx::query_as::<_, WorkspaceMemberWithUser>(
            "SELECT m.id, m.workspace_id, m.user_id, m.role, m.joined_at, u.email, u.first_name, u.last_name FROM workspace_members m JOIN users u ON u.id = m.user_id WHERE m.workspace_id = ? AND m.is_deleted = 0 ORDER BY m.joined_at ASC",
        )
            .bind(workspace_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, member: &WorkspaceMember) -> Result<WorkspaceMember, AppError> {
        sqlx::query_as::<_, WorkspaceMember>(
            "INSERT INTO workspace_members (id, workspace_id, user_id, role, joined_at, added_by, is_deleted, removed_by, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
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
            "UPDATE workspace_members SET is_deleted = 0, role = ?, added_by = ?, removed_by = NULL, joined_at = ?, updated_at = ? WHERE id = ? RETURNING *",
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
        sqlx::query("UPDATE workspace_members SET role = ?, updated_at = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn soft_delete(&self, id: &str, removed_by: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE workspace_members SET is_deleted = 1, removed_by = ?, updated_at = ? WHERE id = ?")
            .bind(removed_by)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
