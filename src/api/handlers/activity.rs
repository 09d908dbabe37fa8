use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::api::dtos::responses::ActivityEntry;
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

const TIMELINE_LIMIT: i64 = 50;

pub async fn get_board_activity(
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

    let rows = state.activity_repo.list_for_board(&board_id, TIMELINE_LIMIT).await?;
    let activity: Vec<ActivityEntry> = rows.into_iter().map(Into::into).collect();

    Ok(Json(json!({ "activity": activity })))
}

pub async fn get_workspace_activity(
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

    let rows = state.activity_repo.list_for_workspace(&workspace_id, TIMELINE_LIMIT).await?;
    let activity: Vec<ActivityEntry> = rows.into_iter().map(Into::into).collect();

    Ok(Json(json!({ "activity": activity })))
}
