use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Workspace-scope role lattice: owner > admin > member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceRole {
    Owner,
    Admin,
    Member,
}

impl WorkspaceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceRole::Owner => "owner",
            WorkspaceRole::Admin => "admin",
            WorkspaceRole::Member => "member",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            WorkspaceRole::Owner => 3,
            WorkspaceRole::Admin => 2,
            WorkspaceRole::Member => 1,
        }
    }

    pub fn satisfies(&self, required: WorkspaceRole) -> bool {
        self.rank() >= required.rank()
    }
}

impl TryFrom<String> for WorkspaceRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "owner" => Ok(WorkspaceRole::Owner),
            "admin" => Ok(WorkspaceRole::Admin),
            "member" => Ok(WorkspaceRole::Member),
            other => Err(format!("unknown workspace role: {other}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMember {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub role: WorkspaceRole,
    pub joined_at: DateTime<Utc>,
    pub added_by: Option<String>,
    pub is_deleted: bool,
    pub removed_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkspaceMember {
    pub fn new(workspace_id: String, user_id: String, role: WorkspaceRole, added_by: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            workspace_id,
            user_id,
            role,
            joined_at: now,
            added_by,
            is_deleted: false,
            removed_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Membership row joined with the member's user profile, for listing endpoints.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMemberWithUser {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub role: WorkspaceRole,
    pub joined_at: DateTime<Utc>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
