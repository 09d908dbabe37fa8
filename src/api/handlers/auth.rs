use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{LoginRequest, RegisterRequest};
use crate::api::dtos::responses::UserProfile;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::activity::{ActivityEntityType, ActivityLog};
use crate::error::AppError;
use crate::state::AppState;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(AppError::Validation(
            "First name, last name, email, and password are required".into(),
        ));
    }

    if payload.password.len() < 6 {
        return Err(AppError::Validation("Password must be at least 6 characters".into()));
    }

    let user = state
        .auth_service
        .register(&payload.email, &payload.first_name, &payload.last_name, &payload.password)
        .await?;

    state
        .activity
        .record(ActivityLog::new(
            user.id.clone(),
            "user_registered",
            ActivityEntityType::User,
            user.id.clone(),
        ))
        .await;

    info!("User registered: {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": UserProfile::from(&user)
        })),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("Email and password are required".into()));
    }

    let (user, token) = state.auth_service.authenticate(&payload.email, &payload.password).await?;

    state
        .activity
        .record(ActivityLog::new(
            user.id.clone(),
            "user_logged_in",
            ActivityEntityType::User,
            user.id.clone(),
        ))
        .await;

    info!("User logged in: {}", user.id);

    Ok(Json(json!({
        "token": token,
        "user": UserProfile::from(&user)
    })))
}

pub async fn get_me(user: AuthUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(json!({ "user": UserProfile::from(&user.0) })))
}
