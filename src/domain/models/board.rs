use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardVisibility {
    Private,
    Workspace,
}

impl BoardVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardVisibility::Private => "private",
            BoardVisibility::Workspace => "workspace",
        }
    }
}

impl TryFrom<String> for BoardVisibility {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "private" => Ok(BoardVisibility::Private),
            "workspace" => Ok(BoardVisibility::Workspace),
            other => Err(format!("unknown board visibility: {other}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub visibility: BoardVisibility,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn new(workspace_id: String, title: String, description: String, visibility: BoardVisibility, created_by: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            workspace_id,
            title,
            description,
            visibility,
            created_by,
            updated_by: None,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
