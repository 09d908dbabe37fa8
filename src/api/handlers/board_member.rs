use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{ChangeBoardMemberRoleRequest, InviteBoardMemberRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{
    activity::{ActivityEntityType, ActivityLog},
    board_member::{BoardMember, BoardRole},
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_board_members(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(board_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.access.require_board_member(&board_id, &user.0.id).await?;

    state
        .board_repo
        .find_active_by_id(&board_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Board not found".into()))?;

    let members = state.board_member_repo.list_active_with_users(&board_id).await?;
    Ok(Json(json!({ "members": members })))
}

pub async fn invite_board_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(board_id): Path<String>,
    Json(payload): Json<InviteBoardMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".into()));
    }

    let role = payload.role.unwrap_or(BoardRole::Member);
    if role == BoardRole::Owner {
        return Err(AppError::InvalidOperation("Cannot invite a member as owner".into()));
    }

    state
        .access
        .require_board_role(&board_id, &user.0.id, BoardRole::Admin)
        .await?;

    state
        .board_repo
        .find_active_by_id(&board_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Board not found".into()))?;

    let target = state
        .user_repo
        .find_by_email(&payload.email.trim().to_lowercase())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if state
        .board_member_repo
        .find_active(&board_id, &target.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already on board".into()));
    }

    // No reactivation at board scope: a previously removed pair gets a
    // fresh row (only active pairs are unique).
    let member = BoardMember::new(board_id.clone(), target.id.clone(), role, user.0.id.clone());
    let created = state.board_member_repo.create(&member).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "board_member_invited",
                ActivityEntityType::Board,
                board_id.clone(),
            )
            .in_board(&board_id)
            .with_metadata(json!({ "invitedUser": target.id.clone(), "role": role })),
        )
        .await;

    info!("Board member invited: {} -> {}", target.id, board_id);

    Ok((StatusCode::CREATED, Json(json!({ "member": created }))))
}

pub async fn remove_board_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((board_id, target_user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .access
        .require_board_role(&board_id, &user.0.id, BoardRole::Admin)
        .await?;

    let membership = state
        .board_member_repo
        .find_active(&board_id, &target_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".into()))?;

    if membership.role == BoardRole::Owner {
        return Err(AppError::InvalidOperation("Owner cannot be removed".into()));
    }

    state.board_member_repo.soft_delete(&membership.id, &user.0.id).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "board_member_removed",
                ActivityEntityType::Board,
                board_id.clone(),
            )
            .in_board(&board_id)
            .with_metadata(json!({ "removedUser": target_user_id.clone() })),
        )
        .await;

    info!("Board member removed: {} from {}", target_user_id, board_id);

    Ok(Json(json!({ "message": "Board member removed" })))
}

pub async fn change_board_member_role(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((board_id, target_user_id)): Path<(String, String)>,
    Json(payload): Json<ChangeBoardMemberRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.role == BoardRole::Owner {
        return Err(AppError::InvalidOperation("Ownership cannot be transferred".into()));
    }

    // Unlike the workspace scope, role changes here are owner-only.
    let requester = state.access.require_board_member(&board_id, &user.0.id).await?;
    if requester.role != BoardRole::Owner {
        return Err(AppError::Forbidden("Only owner can change roles".into()));
    }

    let membership = state
        .board_member_repo
        .find_active(&board_id, &target_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".into()))?;

    if membership.role == BoardRole::Owner {
        return Err(AppError::InvalidOperation("Owner role cannot be changed".into()));
    }

    state
        .board_member_repo
        .update_role(&membership.id, payload.role, &user.0.id)
        .await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "board_member_role_changed",
                ActivityEntityType::Board,
                board_id.clone(),
            )
            .in_board(&board_id)
            .with_metadata(json!({ "targetUser": target_user_id, "role": payload.role })),
        )
        .await;

    Ok(Json(json!({ "message": "Role updated" })))
}
