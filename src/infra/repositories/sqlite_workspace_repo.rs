use crate::domain::{
    models::{workspace::Workspace, workspace_member::WorkspaceMember},
    ports::WorkspaceRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteWorkspaceRepo {
    pool: SqlitePool,
}

impl SqliteWorkspaceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceRepository for SqliteWorkspaceRepo {
    async fn create_with_owner(&self, workspace: &Workspace, owner: &WorkspaceMember) -> Result<Workspace, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Workspace>(
            "INSERT INTO workspaces (id, name, description, owner_id, is_deleted, deleted_at, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&workspace.id)
            .bind(&workspace.name)
            .bind(&workspace.description)
            .bind(&workspace.owner_id)
            .bind(workspace.is_deleted)
            .bind(workspace.deleted_at)
            .bind(workspace.created_at)
            .bind(workspace.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query(
            "INSERT INTO workspace_members (id, workspace_id, user_id, role, joined_at, added_by, is_deleted, removed_by, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
            .bind(&owner.id)
            .bind(&owner.workspace_id)
            .bind(&owner.user_id)
            .bind(owner.role.as_str())
            .bind(owner.joined_at)
            .bind(&owner.added_by)
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

    async fn find_active_by_id(&self, id: &str) -> Result<Option<Workspace>, AppError> {
        sqlx::query_as::<_, Workspace>("SELECT * FROM workspaces WHERE id = ? AND is_deleted = 0")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Workspace>, AppError> {
        sqlx::query_as::<_, Workspace>(
            "SELECT w.* FROM workspaces w JOIN workspace_members m ON m.workspace_id = w.id WHERE m.user_id = ? AND m.is_deleted = 0 AND w.is_deleted = 0 ORDER BY w.created_at DESC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn soft_delete(&self, id: &str) -> Result<(), AppError> {
        let now = Utc::now();
        sqlx::query("UPDATE workspaces SET is_deleted = 1, deleted_at = ?, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
