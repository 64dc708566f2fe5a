use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::FoodEntry;

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub name: String,
    #[serde(default)]
    pub media_base64: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub roast_mode: Option<String>,
}

/// Entry as returned by both creation and listing.
#[derive(Debug, Serialize)]
pub struct EntryView {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub media_base64: Option<String>,
    pub notes: Option<String>,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub roast: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<FoodEntry> for EntryView {
    fn from(e: FoodEntry) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            name: e.name,
            media_base64: e.media_base64,
            notes: e.notes,
            calories: e.calories,
            protein_g: e.protein_g,
            fat_g: e.fat_g,
            carbs_g: e.carbs_g,
            roast: e.roast,
            created_at: e.created_at,
        }
    }
}
