use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct FoodEntry {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub media_base64: Option<String>,
    pub notes: Option<String>,
    pub roast: String,
    pub created_at: OffsetDateTime,
}

/// Row to insert once an estimate has been obtained.
#[derive(Debug, Clone)]
pub struct NewFoodEntry {
    pub user_id: i64,
    pub name: String,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub media_base64: Option<String>,
    pub notes: Option<String>,
    pub roast: String,
}
