use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub board_id: String,
    pub name: String,
    /// 1-based position within the board. Assigned by the store on insert;
    /// ties are tolerated transiently and broken by creation time on reads.
    pub order: i64,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl List {
    pub fn new(board_id: String, name: String, created_by: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            board_id,
            name,
            order: 0,
            created_by,
            updated_by: None,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
