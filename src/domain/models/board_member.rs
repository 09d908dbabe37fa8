use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Board-scope role lattice: owner > admin > member > viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl BoardRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardRole::Owner => "owner",
            BoardRole::Admin => "admin",
            BoardRole::Member => "member",
            BoardRole::Viewer => "viewer",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            BoardRole::Owner => 4,
            BoardRole::Admin => 3,
            BoardRole::Member => 2,
            BoardRole::Viewer => 1,
        }
    }

    pub fn satisfies(&self, required: BoardRole) -> bool {
        self.rank() >= required.rank()
    }
}

impl TryFrom<String> for BoardRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "owner" => Ok(BoardRole::Owner),
            "admin" => Ok(BoardRole::Admin),
            "member" => Ok(BoardRole::Member),
            "viewer" => Ok(BoardRole::Viewer),
            other => Err(format!("unknown board role: {other}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub id: String,
    pub board_id: String,
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub role: BoardRole,
    pub joined_at: DateTime<Utc>,
    pub added_by: String,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
    pub removed_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BoardMember {
    pub fn new(board_id: String, user_id: String, role: BoardRole, added_by: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            board_id,
            user_id,
            role,
            joined_at: now,
            added_by,
            updated_by: None,
            is_deleted: false,
            removed_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BoardMemberWithUser {
    pub id: String,
    pub board_id: String,
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub role: BoardRole,
    pub joined_at: DateTime<Utc>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
