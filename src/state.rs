use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{
    ActivityLogRepository, BoardMemberRepository, BoardRepository, CardRepository, ListRepository,
    UserRepository, WorkspaceMemberRepository, WorkspaceRepository,
};
use crate::domain::services::{
    access_control::AccessControl, activity_logger::ActivityLogger, auth_service::AuthService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub workspace_repo: Arc<dyn WorkspaceRepository>,
    pub workspace_member_repo: Arc<dyn WorkspaceMemberRepository>,
    pub board_repo: Arc<dyn BoardRepository>,
    pub board_member_repo: Arc<dyn BoardMemberRepository>,
    pub list_repo: Arc<dyn ListRepository>,
    pub card_repo: Arc<dyn CardRepository>,
    pub activity_repo: Arc<dyn ActivityLogRepository>,
    pub auth_service: Arc<AuthService>,
    pub access: Arc<AccessControl>,
    pub activity: Arc<ActivityLogger>,
}
