use std::sync::Arc;

use crate::domain::models::{
    board_member::{BoardMember, BoardRole},
    workspace_member::{WorkspaceMember, WorkspaceRole},
};
use crate::domain::ports::{BoardMemberRepository, WorkspaceMemberRepository};
use crate::error::AppError;

/// Authorization façade: every mutation resolves exactly one membership
/// lookup through here before touching the entity store. Soft-deleted
/// memberships confer no role.
pub struct AccessControl {
    workspace_members: Arc<dyn WorkspaceMemberRepository>,
    board_members: Arc<dyn BoardMemberRepository>,
}

impl AccessControl {
    pub fn new(
        workspace_members: Arc<dyn WorkspaceMemberRepository>,
        board_members: Arc<dyn BoardMemberRepository>,
    ) -> Self {
        Self {
            workspace_members,
            board_members,
        }
    }

    pub async fn workspace_role(&self, workspace_id: &str, user_id: &str) -> Result<Option<WorkspaceRole>, AppError> {
        Ok(self
            .workspace_members
            .find_active(workspace_id, user_id)
            .await?
            .map(|m| m.role))
    }

    pub async fn board_role(&self, board_id: &str, user_id: &str) -> Result<Option<BoardRole>, AppError> {
        Ok(self
            .board_members
            .find_active(board_id, user_id)
            .await?
            .map(|m| m.role))
    }

    pub async fn require_workspace_member(&self, workspace_id: &str, user_id: &str) -> Result<WorkspaceMember, AppError> {
        self.workspace_members
            .find_active(workspace_id, user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a workspace member".into()))
    }

    pub async fn require_workspace_role(
        &self,
        workspace_id: &str,
        user_id: &str,
        required: WorkspaceRole,
    ) -> Result<WorkspaceMember, AppError> {
        let member = self.require_workspace_member(workspace_id, user_id).await?;
        if !member.role.satisfies(required) {
            return Err(AppError::Forbidden("Not authorized".into()));
        }
        Ok(member)
    }

    pub async fn require_board_member(&self, board_id: &str, user_id: &str) -> Result<BoardMember, AppError> {
        self.board_members
            .find_active(board_id, user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a board member".into()))
    }

    pub async fn require_board_role(
        &self,
        board_id: &str,
        user_id: &str,
        required: BoardRole,
    ) -> Result<BoardMember, AppError> {
        let member = self.require_board_member(board_id, user_id).await?;
        if !member.role.satisfies(required) {
            return Err(AppError::Forbidden("Not authorized".into()));
        }
        Ok(member)
    }
}
