use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateBoardRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{
    activity::{ActivityEntityType, ActivityLog},
    board::{Board, BoardVisibility},
    board_member::{BoardMember, BoardRole},
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_board(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(workspace_id): Path<String>,
    Json(payload): Json<CreateBoardRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Board title is required".into()));
    }

    // Any active workspace member may create a board; no elevated role needed.
    state.access.require_workspace_member(&workspace_id, &user.0.id).await?;

    state
        .workspace_repo
        .find_active_by_id(&workspace_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".into()))?;

    let board = Board::new(
        workspace_id.clone(),
        payload.title.trim().to_string(),
        payload.description.unwrap_or_default(),
        payload.visibility.unwrap_or(BoardVisibility::Workspace),
        user.0.id.clone(),
    );
    let owner = BoardMember::new(
        board.id.clone(),
        user.0.id.clone(),
        BoardRole::Owner,
        user.0.id.clone(),
    );

    let created = state.board_repo.create_with_owner(&board, &owner).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "board_created",
                ActivityEntityType::Board,
                created.id.clone(),
            )
            .in_workspace(&workspace_id)
            .in_board(&created.id)
            .with_metadata(json!({ "workspace": workspace_id, "title": created.title.clone() })),
        )
        .await;

    info!("Board created: {}", created.id);

    Ok((StatusCode::CREATED, Json(json!({ "board": created }))))
}

pub async fn get_boards_by_workspace(
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

    let boards = state.board_repo.list_by_workspace(&workspace_id).await?;
    Ok(Json(json!({ "boards": boards })))
}

pub async fn get_board_by_id(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(board_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.access.require_board_member(&board_id, &user.0.id).await?;

    let board = state
        .board_repo
        .find_active_by_id(&board_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Board not found".into()))?;

    Ok(Json(json!({ "board": board })))
}

pub async fn delete_board(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(board_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let membership = state.access.require_board_member(&board_id, &user.0.id).await?;
    if membership.role != BoardRole::Owner {
        return Err(AppError::Forbidden("Only board owner can delete board".into()));
    }

    let board = state
        .board_repo
        .find_active_by_id(&board_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Board not found".into()))?;

    state.board_repo.soft_delete(&board_id, &user.0.id).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "board_deleted",
                ActivityEntityType::Board,
                board_id.clone(),
            )
            .in_workspace(&board.workspace_id)
            .in_board(&board_id),
        )
        .await;

    info!("Board deleted: {}", board_id);

    Ok(Json(json!({ "message": "Board deleted successfully" })))
}
