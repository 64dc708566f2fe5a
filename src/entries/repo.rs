use async_trait::async_trait;

use super::repo_types::{FoodEntry, NewFoodEntry};
use crate::{db::PgStore, error::AppError};

#[async_trait]
pub trait EntryRepo: Send + Sync {
    async fn insert(&self, entry: NewFoodEntry) -> Result<FoodEntry, AppError>;

    /// All entries owned by `user_id`, newest first.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<FoodEntry>, AppError>;
}

#[async_trait]
impl EntryRepo for PgStore {
    async fn insert(&self, entry: NewFoodEntry) -> Result<FoodEntry, AppError> {
        let row = sqlx::query_as::<_, FoodEntry>(
            r#"
            INSERT INTO food_entries
                (user_id, name, calories, protein_g, fat_g, carbs_g, media_base64, notes, roast)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, name, calories, protein_g, fat_g, carbs_g,
                      media_base64, notes, roast, created_at
            "#,
        )
        .bind(entry.user_id)
        .bind(&entry.name)
        .bind(entry.calories)
        .bind(entry.protein_g)
        .bind(entry.fat_g)
        .bind(entry.carbs_g)
        .bind(&entry.media_base64)
        .bind(&entry.notes)
        .bind(&entry.roast)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<FoodEntry>, AppError> {
        let rows = sqlx::query_as::<_, FoodEntry>(
            r#"
            SELECT id, user_id, name, calories, protein_g, fat_g, carbs_g,
                   media_base64, notes, roast, created_at
            FROM food_entries
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
