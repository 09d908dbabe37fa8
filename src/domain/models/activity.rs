use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityEntityType {
    User,
    Workspace,
    Board,
    List,
    Card,
}

impl ActivityEntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityEntityType::User => "user",
            ActivityEntityType::Workspace => "workspace",
            ActivityEntityType::Board => "board",
            ActivityEntityType::List => "list",
            ActivityEntityType::Card => "card",
        }
    }
}

impl TryFrom<String> for ActivityEntityType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "user" => Ok(ActivityEntityType::User),
            "workspace" => Ok(ActivityEntityType::Workspace),
            "board" => Ok(ActivityEntityType::Board),
            "list" => Ok(ActivityEntityType::List),
            "card" => Ok(ActivityEntityType::Card),
            other => Err(format!("unknown activity entity type: {other}")),
        }
    }
}

/// Append-only audit record. The nullable `workspace_id` / `board_id`
/// columns scope an entry to the timeline it belongs to, so timeline
/// queries never have to dig into the metadata map.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub actor_id: String,
    pub action: String,
    #[sqlx(try_from = "String")]
    pub entity_type: ActivityEntityType,
    pub entity_id: String,
    pub workspace_id: Option<String>,
    pub board_id: Option<String>,
    pub metadata: Json<Value>,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(actor_id: String, action: &str, entity_type: ActivityEntityType, entity_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            actor_id,
            action: action.to_string(),
            entity_type,
            entity_id,
            workspace_id: None,
            board_id: None,
            metadata: Json(Value::Object(Default::default())),
            created_at: Utc::now(),
        }
    }

    pub fn in_workspace(mut self, workspace_id: &str) -> Self {
        self.workspace_id = Some(workspace_id.to_string());
        self
    }

    pub fn in_board(mut self, board_id: &str) -> Self {
        self.board_id = Some(board_id.to_string());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Json(metadata);
        self
    }
}

/// Timeline entry joined with the actor's display fields.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityWithActor {
    pub id: String,
    pub actor_id: String,
    pub action: String,
    #[sqlx(try_from = "String")]
    pub entity_type: ActivityEntityType,
    pub entity_id: String,
    pub metadata: Json<Value>,
    pub created_at: DateTime<Utc>,
    pub actor_first_name: String,
    pub actor_last_name: String,
    pub actor_email: String,
}
