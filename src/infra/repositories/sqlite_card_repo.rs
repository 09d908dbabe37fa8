use crate::domain::{models::card::Card, ports::CardRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteCardRepo {
    pool: SqlitePool,
}

impl SqliteCardRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardRepository for SqliteCardRepo {
    async fn create(&self, card: &Card) -> Result<Card, AppError> {
        sqlx::query_as::<_, Card>(
            "INSERT INTO cards (id, list_id, name, description, start_date, due_date, \"order\", assigned_to, created_by, updated_by, is_deleted, deleted_by, deleted_at, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, (SELECT COALESCE(MAX(\"order\"), 0) + 1 FROM cards WHERE list_id = ? AND is_deleted = 0), ?, ?, NULL, 0, NULL, NULL, ?, ?) RETURNING *",
        )
            .bind(&card.id)
            .bind(&card.list_id)
            .bind(&card.name)
            .bind(&card.description)
            .bind(card.start_date)
            .bind(card.due_date)
            .bind(&card.list_id)
            .bind(&card.assigned_to)
            .bind(&card.created_by)
            .bind(card.created_at)
            .bind(card.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<Card>, AppError> {
        sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = ? AND is_deleted = 0")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_list(&self, list_id: &str) -> Result<Vec<Card>, AppError> {
        sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE list_id = ? AND is_deleted = 0 ORDER BY \"order\" ASC, created_at ASC, id ASC",
        )
            .bind(list_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, card: &Card) -> Result<Card, AppError> {
        sqlx::query_as::<_, Card>(
            "UPDATE cards SET name = ?, description = ?, start_date = ?, due_date = ?, assigned_to = ?, updated_by = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
            .bind(&card.name)
            .bind(&card.description)
            .bind(card.start_date)
            .bind(card.due_date)
            .bind(&card.assigned_to)
            .bind(&card.updated_by)
            .bind(Utc::now())
            .bind(&card.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn move_card(&self, id: &str, list_id: &str, order: i64, updated_by: &str) -> Result<(), AppError> {
        // Last writer wins per card; siblings keep their order values.
        sqlx::query("UPDATE cards SET list_id = ?, \"order\" = ?, updated_by = ?, updated_at = ? WHERE id = ?")
            .bind(list_id)
            .bind(order)
            .bind(updated_by)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn soft_delete(&self, id: &str, deleted_by: &str) -> Result<(), AppError> {
        let now = Utc::now();
        sqlx::query("UPDATE cards SET is_deleted = 1, deleted_by = ?, deleted_at = ?, updated_at = ? WHERE id = ?")
            .bind(deleted_by)
            .bind(now)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
