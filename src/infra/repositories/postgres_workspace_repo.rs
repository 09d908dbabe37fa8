use crate::domain::{
    models::{workspace::Workspace, workspace_member::WorkspaceMember},
    ports::WorkspaceRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresWorkspaceRepo {
    pool: PgPool,
}

impl PostgresWorkspaceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceRepository for PostgresWorkspaceRepo {
    async fn create_with_owner(&self, workspace: &Workspace, owner: &WorkspaceMember) -> Result<Workspace, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Workspace>(
            "INSERT INTO workspaces (id, name, description, owner_id, is_deleted, deleted_at, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
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
            "INSERT INTO workspace_members (id, workspace_id, user_id, role, joined_at, added_by, is_deleted, removed_by, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
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
        sqlx::query_as::<_, Workspace>("SELECT * FROM workspaces WHERE id = $1 AND is_deleted = FALSE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Workspace>, AppError> {
        sqlx::query_as::<_, Workspace>(
            "SELECT w.* FROM workspaces w JOIN workspace_members m ON m.workspace_id = w.id WHERE m.user_id = $1 AND m.is_deleted = FALSE AND w.is_deleted = FALSE ORDER BY w.created_at DESC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn soft_delete(&self, id: &str) -> Result<(), AppError> {
        let now = Utc::now();
        sqlx::query("UPDATE workspaces SET is_deleted = TRUE, deleted_at = $1, updated_at = $2 WHERE id = $3")
            .bind(now)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
