use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use std::sync::Arc;
use tracing::Span;

use crate::domain::models::user::User;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the caller from the `Authorization: Bearer <token>` header and
/// re-fetches the user row, so stale tokens for deleted accounts fail here.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let claims = app_state.auth_service.verify_token(token)?;

        let user = app_state
            .user_repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Span::current().record("user_id", user.id.as_str());

        Ok(AuthUser(user))
    }
}
