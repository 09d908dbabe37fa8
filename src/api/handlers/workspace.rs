use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateWorkspaceRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{
    activity::{ActivityEntityType, ActivityLog},
    workspace::Workspace,
    workspace_member::{WorkspaceMember, WorkspaceRole},
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateWorkspaceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Workspace name is required".into()));
    }

    let workspace = Workspace::new(
        payload.name.trim().to_string(),
        payload.description.unwrap_or_default(),
        user.0.id.clone(),
    );
    let owner = WorkspaceMember::new(
        workspace.id.clone(),
        user.0.id.clone(),
        WorkspaceRole::Owner,
        None,
    );

    let created = state.workspace_repo.create_with_owner(&workspace, &owner).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "workspace_created",
                ActivityEntityType::Workspace,
                created.id.clone(),
            )
            .in_workspace(&created.id)
            .with_metadata(json!({ "name": created.name.clone() })),
        )
        .await;

    info!("Workspace created: {}", created.id);

    Ok((StatusCode::CREATED, Json(json!({ "workspace": created }))))
}

pub async fn get_my_workspaces(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let workspaces = state.workspace_repo.list_for_user(&user.0.id).await?;
    Ok(Json(json!({ "workspaces": workspaces })))
}

pub async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(workspace_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let workspace = state
        .workspace_repo
        .find_active_by_id(&workspace_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".into()))?;

    // Workspace deletion is reserved for the owning user, not owner-role members.
    if workspace.owner_id != user.0.id {
        return Err(AppError::Forbidden("Only the workspace owner can delete the workspace".into()));
    }

    state.workspace_repo.soft_delete(&workspace_id).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "workspace_deleted",
                ActivityEntityType::Workspace,
                workspace_id.clone(),
            )
            .in_workspace(&workspace_id),
        )
        .await;

    info!("Workspace deleted: {}", workspace_id);

    Ok(Json(json!({ "message": "Workspace deleted successfully" })))
}
