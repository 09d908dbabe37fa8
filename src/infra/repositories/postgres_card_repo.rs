use crate::domain::{models::card::Card, ports::CardRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresCardRepo {
    pool: PgPool,
}

impl PostgresCardRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardRepository for PostgresCardRepo {
    async fn create(&self, card: &Card) -> Result<Card, AppError> {
        sqlx::query_as::<_, Card>(
            "INSERT INTO cards (id, list_id, name, description, start_date, due_date, \"order\", assigned_to, created_by, updated_by, is_deleted, deleted_by, deleted_at, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, (SELECT COALESCE(MAX(\"order\"), 0) + 1 FROM cards WHERE list_id = $2 AND is_deleted = FALSE), $7, $8, NULL, FALSE, NULL, NULL, $9, $10) RETURNING *",
        )
            .bind(&card.id)
            .bind(&card.list_id)
            .bind(&card.name)
            .bind(&card.description)
            .bind(card.start_date)
            .bind(card.due_date)
            .bind(&card.assigned_to)
            .bind(&card.created_by)
            .bind(card.created_at)
            .bind(card.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<Card>, AppError> {
        sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = $1 AND is_deleted = FALSE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_list(&self, list_id: &str) -> Result<Vec<Card>, AppError> {
        sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE list_id = $1 AND is_deleted = FALSE ORDER BY \"order\" ASC, created_at ASC, id ASC",
        )
            .bind(list_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, card: &Card) -> Result<Card, AppError> {
        sqlx::query_as::<_, Card>(
            "UPDATE cards SET name = $1, description = $2, start_date = $3, due_date = $4, assigned_to = $5, updated_by = $6, updated_at = $7 WHERE id = $8 RETURNING *",
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
        sqlx::query("UPDATE cards SET list_id = $1, \"order\" = $2, updated_by = $3, updated_at = $4 WHERE id = $5")
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
        sqlx::query("UPDATE cards SET is_deleted = TRUE, deleted_by = $1, deleted_at = $2, updated_at = $3 WHERE id = $4")
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
