use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{ChangeWorkspaceMemberRoleRequest, InviteWorkspaceMemberRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{
    activity::{ActivityEntityType, ActivityLog},
    workspace_member::{WorkspaceMember, WorkspaceRole},
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_workspace_members(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(workspace_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.access.require_workspace_member(&workspace_id, &user.0.id).await?;

    state
        .workspace_repo
        .find_active_by_id(&workspace_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".into()))?;

    let members = state.workspace_member_repo.list_active_with_users(&workspace_id).await?;
    Ok(Json(json!({ "members": members })))
}

pub async fn invite_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(workspace_id): Path<String>,
    Json(payload): Json<InviteWorkspaceMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".into()));
    }

    let role = payload.role.unwrap_or(WorkspaceRole::Member);
    if role == WorkspaceRole::Owner {
        return Err(AppError::InvalidOperation("Cannot invite a member as owner".into()));
    }

    state
        .access
        .require_workspace_role(&workspace_id, &user.0.id, WorkspaceRole::Admin)
        .await?;

    state
        .workspace_repo
        .find_active_by_id(&workspace_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".into()))?;

    let target = state
        .user_repo
        .find_by_email(&payload.email.trim().to_lowercase())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let member = match state.workspace_member_repo.find_any(&workspace_id, &target.id).await? {
        Some(existing) if !existing.is_deleted => {
            return Err(AppError::Conflict("User is already a workspace member".into()));
        }
        // A previously removed member rejoins through the same row, keeping
        // the (workspace, user) pair unique.
        Some(removed) => {
            state
                .workspace_member_repo
                .reactivate(&removed.id, role, &user.0.id)
                .await?
        }
        None => {
            let member = WorkspaceMember::new(
                workspace_id.clone(),
                target.id.clone(),
                role,
                Some(user.0.id.clone()),
            );
            state.workspace_member_repo.create(&member).await?
        }
    };

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "workspace_member_invited",
                ActivityEntityType::Workspace,
                workspace_id.clone(),
            )
            .in_workspace(&workspace_id)
            .with_metadata(json!({ "invitedUser": target.id.clone(), "role": role })),
        )
        .await;

    info!("Workspace member invited: {} -> {}", target.id, workspace_id);

    Ok((StatusCode::CREATED, Json(json!({ "member": member }))))
}

pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((workspace_id, target_user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .access
        .require_workspace_role(&workspace_id, &user.0.id, WorkspaceRole::Admin)
        .await?;

    let membership = state
        .workspace_member_repo
        .find_active(&workspace_id, &target_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".into()))?;

    if membership.role == WorkspaceRole::Owner {
        return Err(AppError::InvalidOperation("Owner cannot be removed".into()));
    }

    state.workspace_member_repo.soft_delete(&membership.id, &user.0.id).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "workspace_member_removed",
                ActivityEntityType::Workspace,
                workspace_id.clone(),
            )
            .in_workspace(&workspace_id)
            .with_metadata(json!({ "removedUser": target_user_id.clone() })),
        )
        .await;

    info!("Workspace member removed: {} from {}", target_user_id, workspace_id);

    Ok(Json(json!({ "message": "Workspace member removed" })))
}

pub async fn change_member_role(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((workspace_id, target_user_id)): Path<(String, String)>,
    Json(payload): Json<ChangeWorkspaceMemberRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.role == WorkspaceRole::Owner {
        return Err(AppError::InvalidOperation("Ownership cannot be transferred".into()));
    }

    state
        .access
        .require_workspace_role(&workspace_id, &user.0.id, WorkspaceRole::Admin)
        .await?;

    let membership = state
        .workspace_member_repo
        .find_active(&workspace_id, &target_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".into()))?;

    if membership.role == WorkspaceRole::Owner {
        return Err(AppError::InvalidOperation("Owner role cannot be changed".into()));
    }

    state.workspace_member_repo.update_role(&membership.id, payload.role).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "workspace_member_role_changed",
                ActivityEntityType::Workspace,
                workspace_id.clone(),
            )
            .in_workspace(&workspace_id)
            .with_metadata(json!({ "targetUser": target_user_id, "role": payload.role })),
        )
        .await;

    Ok(Json(json!({ "message": "Role updated" })))
}
