use crate::domain::models::{
    activity::{ActivityLog, ActivityWithActor},
    board::Board,
    board_member::{BoardMember, BoardMemberWithUser, BoardRole},
    card::Card,
    list::List,
    user::User,
    workspace::Workspace,
    workspace_member::{WorkspaceMember, WorkspaceMemberWithUser, WorkspaceRole},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    /// Persists the lockout counters after a login attempt.
    async fn update_lockout_state(&self, user: &User) -> Result<(), AppError>;
}

#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Inserts the workspace and its owner membership in one transaction.
    async fn create_with_owner(&self, workspace: &Workspace, owner: &WorkspaceMember) -> Result<Workspace, AppError>;
    async fn find_active_by_id(&self, id: &str) -> Result<Option<Workspace>, AppError>;
    /// Workspaces the user holds an active membership in, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Workspace>, AppError>;
    async fn soft_delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait WorkspaceMemberRepository: Send + Sync {
    async fn find_active(&self, workspace_id: &str, user_id: &str) -> Result<Option<WorkspaceMember>, AppError>;
    /// Includes soft-deleted rows; used to decide between insert and reactivation.
    async fn find_any(&self, workspace_id: &str, user_id: &str) -> Result<Option<WorkspaceMember>, AppError>;
    async fn list_active_with_users(&self, workspace_id: &str) -> Result<Vec<WorkspaceMemberWithUser>, AppError>;
    async fn create(&self, member: &WorkspaceMember) -> Result<WorkspaceMember, AppError>;
    /// Clears the delete flag on an existing row instead of inserting a
    /// duplicate (workspace,user) pair.
    async fn reactivate(&self, id: &str, role: WorkspaceRole, added_by: &str) -> Result<WorkspaceMember, AppError>;
    async fn update_role(&self, id: &str, role: WorkspaceRole) -> Result<(), AppError>;
    async fn soft_delete(&self, id: &str, removed_by: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Inserts the board and its owner membership in one transaction.
    async fn create_with_owner(&self, board: &Board, owner: &BoardMember) -> Result<Board, AppError>;
    async fn find_active_by_id(&self, id: &str) -> Result<Option<Board>, AppError>;
    async fn list_by_workspace(&self, workspace_id: &str) -> Result<Vec<Board>, AppError>;
    async fn soft_delete(&self, id: &str, actor_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BoardMemberRepository: Send + Sync {
    async fn find_active(&self, board_id: &str, user_id: &str) -> Result<Option<BoardMember>, AppError>;
    async fn list_active_with_users(&self, board_id: &str) -> Result<Vec<BoardMemberWithUser>, AppError>;
    async fn create(&self, member: &BoardMember) -> Result<BoardMember, AppError>;
    async fn update_role(&self, id: &str, role: BoardRole, updated_by: &str) -> Result<(), AppError>;
    async fn soft_delete(&self, id: &str, removed_by: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Inserts the list with `order` assigned atomically as
    /// max(active sibling order) + 1.
    async fn create(&self, list: &List) -> Result<List, AppError>;
    async fn find_active_by_id(&self, id: &str) -> Result<Option<List>, AppError>;
    async fn list_by_board(&self, board_id: &str) -> Result<Vec<List>, AppError>;
    /// Batched reassignment: `order = position + 1` for each supplied id,
    /// scoped to active lists of the board. Unknown ids are skipped.
    async fn reorder(&self, board_id: &str, ordered_ids: &[String], updated_by: &str) -> Result<(), AppError>;
    async fn soft_delete(&self, id: &str, actor_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Inserts the card with `order` assigned atomically as
    /// max(active sibling order) + 1.
    async fn create(&self, card: &Card) -> Result<Card, AppError>;
    async fn find_active_by_id(&self, id: &str) -> Result<Option<Card>, AppError>;
    async fn list_by_list(&self, list_id: &str) -> Result<Vec<Card>, AppError>;
    async fn update(&self, card: &Card) -> Result<Card, AppError>;
    /// Writes the caller-supplied target list and order directly; siblings
    /// are not re-indexed.
    async fn move_card(&self, id: &str, list_id: &str, order: i64, updated_by: &str) -> Result<(), AppError>;
    async fn soft_delete(&self, id: &str, deleted_by: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn append(&self, entry: &ActivityLog) -> Result<(), AppError>;
    async fn list_for_board(&self, board_id: &str, limit: i64) -> Result<Vec<ActivityWithActor>, AppError>;
    async fn list_for_workspace(&self, workspace_id: &str, limit: i64) -> Result<Vec<ActivityWithActor>, AppError>;
}
