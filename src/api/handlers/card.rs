use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateCardRequest, MoveCardRequest, UpdateCardRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{
    activity::{ActivityEntityType, ActivityLog},
    card::Card,
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_card(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(list_id): Path<String>,
    Json(payload): Json<CreateCardRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Card name is required".into()));
    }

    let list = state
        .list_repo
        .find_active_by_id(&list_id)
        .await?
        .ok_or_else(|| AppError::NotFound("List not found".into()))?;

    state.access.require_board_member(&list.board_id, &user.0.id).await?;

    let card = Card::new(list_id.clone(), payload.name.trim().to_string(), user.0.id.clone());
    let created = state.card_repo.create(&card).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "card_created",
                ActivityEntityType::Card,
                created.id.clone(),
            )
            .in_board(&list.board_id)
            .with_metadata(json!({
                "board": list.board_id,
                "list": list_id.clone(),
                "order": created.order,
                "name": created.name.clone()
            })),
        )
        .await;

    info!("Card created: {} in list {}", created.id, list_id);

    Ok((StatusCode::CREATED, Json(json!({ "card": created }))))
}

pub async fn get_cards_by_list(
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

    let cards = state.card_repo.list_by_list(&list_id).await?;
    Ok(Json(json!({ "cards": cards })))
}

pub async fn update_card(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(card_id): Path<String>,
    Json(payload): Json<UpdateCardRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut card = state
        .card_repo
        .find_active_by_id(&card_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Card not found".into()))?;

    let list = state
        .list_repo
        .find_active_by_id(&card.list_id)
        .await?
        .ok_or_else(|| AppError::NotFound("List not found".into()))?;

    state.access.require_board_member(&list.board_id, &user.0.id).await?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Card name cannot be empty".into()));
        }
        card.name = name.trim().to_string();
    }
    if let Some(description) = payload.description {
        card.description = description;
    }
    if payload.start_date.is_some() {
        card.start_date = payload.start_date;
    }
    if payload.due_date.is_some() {
        card.due_date = payload.due_date;
    }
    if payload.assigned_to.is_some() {
        card.assigned_to = payload.assigned_to;
    }
    card.updated_by = Some(user.0.id.clone());

    let updated = state.card_repo.update(&card).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "card_updated",
                ActivityEntityType::Card,
                card_id.clone(),
            )
            .in_board(&list.board_id)
            .with_metadata(json!({ "list": updated.list_id.clone() })),
        )
        .await;

    Ok(Json(json!({ "card": updated })))
}

pub async fn move_card(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(card_id): Path<String>,
    Json(payload): Json<MoveCardRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.order < 1 {
        return Err(AppError::Validation("Order must be a positive integer".into()));
    }

    let card = state
        .card_repo
        .find_active_by_id(&card_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Card not found".into()))?;

    let target_list = state
        .list_repo
        .find_active_by_id(&payload.list_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Target list not found".into()))?;

    state.access.require_board_member(&target_list.board_id, &user.0.id).await?;

    state
        .card_repo
        .move_card(&card.id, &payload.list_id, payload.order, &user.0.id)
        .await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "card_moved",
                ActivityEntityType::Card,
                card_id.clone(),
            )
            .in_board(&target_list.board_id)
            .with_metadata(json!({ "toList": payload.list_id.clone(), "newOrder": payload.order })),
        )
        .await;

    info!("Card moved: {} -> list {}", card_id, payload.list_id);

    Ok(Json(json!({ "message": "Card moved successfully" })))
}

pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(card_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let card = state
        .card_repo
        .find_active_by_id(&card_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Card not found".into()))?;

    let list = state
        .list_repo
        .find_active_by_id(&card.list_id)
        .await?
        .ok_or_else(|| AppError::NotFound("List not found".into()))?;

    state.access.require_board_member(&list.board_id, &user.0.id).await?;

    state.card_repo.soft_delete(&card_id, &user.0.id).await?;

    state
        .activity
        .record(
            ActivityLog::new(
                user.0.id.clone(),
                "card_deleted",
                ActivityEntityType::Card,
                card_id.clone(),
            )
            .in_board(&list.board_id)
            .with_metadata(json!({ "list": card.list_id })),
        )
        .await;

    info!("Card deleted: {}", card_id);

    Ok(Json(json!({ "message": "Card deleted successfully" })))
}
