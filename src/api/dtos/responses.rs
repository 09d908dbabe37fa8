use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;

use crate::domain::models::{
    activity::{ActivityEntityType, ActivityWithActor},
    user::{User, UserRole},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityActor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Timeline entry as the UI consumes it: the raw record plus a
/// human-readable message rendered from the action vocabulary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub message: String,
    pub action: String,
    pub actor: ActivityActor,
    pub entity_type: ActivityEntityType,
    pub entity_id: String,
    pub metadata: Json<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityWithActor> for ActivityEntry {
    fn from(row: ActivityWithActor) -> Self {
        let actor_name = format!("{} {}", row.actor_first_name, row.actor_last_name);
        Self {
            message: activity_message(&row.action, &actor_name),
            id: row.id,
            action: row.action,
            actor: ActivityActor {
                id: row.actor_id,
                first_name: row.actor_first_name,
                last_name: row.actor_last_name,
                email: row.actor_email,
            },
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            metadata: row.metadata,
            created_at: row.created_at,
        }
    }
}

fn activity_message(action: &str, actor: &str) -> String {
    match action {
        "user_registered" => format!("{actor} joined TaskFlow"),
        "user_logged_in" => format!("{actor} logged in"),
        "workspace_created" => format!("{actor} created a workspace"),
        "workspace_deleted" => format!("{actor} deleted a workspace"),
        "workspace_member_invited" => format!("{actor} invited a member to the workspace"),
        "workspace_member_removed" => format!("{actor} removed a member from the workspace"),
        "workspace_member_role_changed" => format!("{actor} changed a workspace member's role"),
        "board_created" => format!("{actor} created a board"),
        "board_deleted" => format!("{actor} deleted a board"),
        "board_member_invited" => format!("{actor} invited a member to the board"),
        "board_member_removed" => format!("{actor} removed a member from the board"),
        "board_member_role_changed" => format!("{actor} changed a board member's role"),
        "list_created" => format!("{actor} added a list"),
        "list_deleted" => format!("{actor} deleted a list"),
        "lists_reordered" => format!("{actor} reordered lists"),
        "card_created" => format!("{actor} added a card"),
        "card_updated" => format!("{actor} updated a card"),
        "card_moved" => format!("{actor} moved a card"),
        "card_deleted" => format!("{actor} deleted a card"),
        _ => format!("{actor} performed an action"),
    }
}
