use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub list_id: String,
    pub name: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    /// 1-based position within the list. Moves write the caller-supplied
    /// value as-is; readers break ties by creation time.
    pub order: i64,
    pub assigned_to: Option<String>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(list_id: String, name: String, created_by: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            list_id,
            name,
            description: String::new(),
            start_date: None,
            due_date: None,
            order: 0,
            assigned_to: None,
            created_by,
            updated_by: None,
            is_deleted: false,
            deleted_by: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
