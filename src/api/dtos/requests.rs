use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::models::{
    board::BoardVisibility, board_member::BoardRole, workspace_member::WorkspaceRole,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct InviteWorkspaceMemberRequest {
    pub email: String,
    pub role: Option<WorkspaceRole>,
}

#[derive(Deserialize)]
pub struct ChangeWorkspaceMemberRoleRequest {
    pub role: WorkspaceRole,
}

#[derive(Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    pub description: Option<String>,
    pub visibility: Option<BoardVisibility>,
}

#[derive(Deserialize)]
pub struct InviteBoardMemberRequest {
    pub email: String,
    pub role: Option<BoardRole>,
}

#[derive(Deserialize)]
pub struct ChangeBoardMemberRoleRequest {
    pub role: BoardRole,
}

#[derive(Deserialize)]
pub struct CreateListRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderListsRequest {
    pub ordered_list_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreateCardRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    pub list_id: String,
    pub order: i64,
}
