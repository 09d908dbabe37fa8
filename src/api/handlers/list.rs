use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateListRequest, ReorderListsRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{
    activity::{ActivityEntityType, ActivityLog},
    list::List,
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(board_id): Path<String>,
    Json(payload): Json<CreateListRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("List name is required".into()));
    }

    state.access.require_board_member(&board_id, &user.0.id).await?;

    state
        .board_repo
        .find_active_by_id(&board_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Board not found".into()))?;

    let list = List::new(board_id.clone(), payload.name.trim().to_string(), user.0.id.clone());
    let created = state.list_repo.create(&list).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "list_created",
                ActivityEntityType::List,
                created.id.clone(),
            )
            .in_board(&board_id)
            .with_metadata(json!({ "board": board_id.clone(), "order": created.order, "name": created.name.clone() })),
        )
        .await;

    info!("List created: {} in board {}", created.id, board_id);

    Ok((StatusCode::CREATED, Json(json!({ "list": created }))))
}

pub async fn get_lists_by_board(
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

    let lists = state.list_repo.list_by_board(&board_id).await?;
    Ok(Json(json!({ "lists": lists })))
}

pub async fn delete_list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(list_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let list = state
        .list_repo
        .find_active_by_id(&list_id)
        .await?
        .ok_or_else(|| AppError::NotFound("List not found".into()))?;

    state.access.require_board_member(&list.board_id, &user.0.id).await?;

    state.list_repo.soft_delete(&list_id, &user.0.id).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "list_deleted",
                ActivityEntityType::List,
                list_id.clone(),
            )
            .in_board(&list.board_id)
            .with_metadata(json!({ "board": list.board_id })),
        )
        .await;

    info!("List deleted: {}", list_id);

    Ok(Json(json!({ "message": "List deleted successfully" })))
}

pub async fn reorder_lists(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(board_id): Path<String>,
    Json(payload): Json<ReorderListsRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.ordered_list_ids.is_empty() {
        return Err(AppError::Validation("orderedListIds is required".into()));
    }

    state.access.require_board_member(&board_id, &user.0.id).await?;

    state
        .board_repo
        .find_active_by_id(&board_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Board not found".into()))?;

    state
        .list_repo
        .reorder(&board_id, &payload.ordered_list_ids, &user.0.id)
        .await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "lists_reordered",
                ActivityEntityType::Board,
                board_id.clone(),
            )
            .in_board(&board_id)
            .with_metadata(json!({ "count": payload.ordered_list_ids.len() })),
        )
        .await;

    info!("Lists reordered in board {}", board_id);

    Ok(Json(json!({ "message": "Lists reordered successfully" })))
}
