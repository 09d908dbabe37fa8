use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

use crate::api::handlers::{activity, auth, board, board_member, card, health, list, workspace, workspace_member};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::get_me))

        // Workspaces & membership
        .route("/api/workspaces", post(workspace::create_workspace).get(workspace::get_my_workspaces))
        .route("/api/workspaces/{workspace_id}", delete(workspace::delete_workspace))
        .route("/api/workspaces/{workspace_id}/members", get(workspace_member::get_workspace_members))
        .route("/api/workspaces/{workspace_id}/invite", post(workspace_member::invite_member))
        .route(
            "/api/workspaces/{workspace_id}/members/{user_id}",
            delete(workspace_member::remove_member).patch(workspace_member::change_member_role),
        )

        // Boards & membership
        .route(
            "/api/workspaces/{workspace_id}/boards",
            post(board::create_board).get(board::get_boards_by_workspace),
        )
        .route("/api/boards/{board_id}", get(board::get_board_by_id).delete(board::delete_board))
        .route(
            "/api/boards/{board_id}/members",
            get(board_member::get_board_members).post(board_member::invite_board_member),
        )
        .route(
            "/api/boards/{board_id}/members/{user_id}",
            delete(board_member::remove_board_member).patch(board_member::change_board_member_role),
        )

        // Lists
        .route("/api/boards/{board_id}/lists", post(list::create_list).get(list::get_lists_by_board))
        .route("/api/boards/{board_id}/lists/reorder", put(list::reorder_lists))
        .route("/api/lists/{list_id}", delete(list::delete_list))

        // Cards
        .route("/api/lists/{list_id}/cards", post(card::create_card).get(card::get_cards_by_list))
        .route("/api/cards/{card_id}", patch(card::update_card).delete(card::delete_card))
        .route("/api/cards/{card_id}/move", patch(card::move_card))

        // Activity timelines
        .route("/api/boards/{board_id}/activity", get(activity::get_board_activity))
        .route("/api/workspaces/{workspace_id}/activity", get(activity::get_workspace_activity))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
