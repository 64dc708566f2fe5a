use base64ct::{Base64, Encoding};
use tracing::{info, warn};

use super::{
    dto::{CreateEntryRequest, EntryView},
    repo_types::NewFoodEntry,
};
use crate::{
    auth::services::resolve_user,
    error::AppError,
    estimator::{FoodDescription, RoastMode},
    state::AppState,
};

/// Estimates the food, then persists it. Nothing is written unless the estimate succeeds.
pub async fn create_entry(
    state: &AppState,
    email: &str,
    req: CreateEntryRequest,
) -> Result<EntryView, AppError> {
    let user = resolve_user(state, email).await?;

    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    let roast_mode = parse_roast_mode(req.roast_mode.as_deref())?;
    let media = decode_media(req.media_base64.as_deref())?;
    let notes = req.notes.filter(|n| !n.trim().is_empty());

    let description = FoodDescription {
        name: name.clone(),
        notes: notes.clone(),
        image: media.as_ref().map(|(_, bytes)| bytes.clone()),
        roast_mode,
    };
    let info = state
        .estimator
        .estimate(&description)
        .await
        .map_err(|e| {
            warn!(user_id = user.id, error = %e, "estimation failed; entry not stored");
            AppError::EstimationFailed(e)
        })?;

    let entry = state
        .entries
        .insert(NewFoodEntry {
            user_id: user.id,
            name,
            calories: info.calories,
            protein_g: info.protein_g,
            fat_g: info.fat_g,
            carbs_g: info.carbs_g,
            media_base64: media.map(|(encoded, _)| encoded),
            notes,
            roast: info.roast,
        })
        .await?;

    info!(user_id = user.id, entry_id = entry.id, %roast_mode, "entry created");
    Ok(entry.into())
}

pub async fn list_entries(state: &AppState, email: &str) -> Result<Vec<EntryView>, AppError> {
    let user = resolve_user(state, email).await?;
    let entries = state.entries.list_by_user(user.id).await?;
    Ok(entries.into_iter().map(EntryView::from).collect())
}

/// Absent mode takes the default; anything unrecognized is rejected.
fn parse_roast_mode(raw: Option<&str>) -> Result<RoastMode, AppError> {
    match raw {
        None => Ok(RoastMode::default()),
        Some(s) => s
            .parse()
            .map_err(|_| AppError::InvalidRoastMode(s.to_string())),
    }
}

/// Returns the canonical base64 text alongside the decoded bytes. Accepts an optional
/// `data:<mime>;base64,` prefix and embedded whitespace.
fn decode_media(raw: Option<&str>) -> Result<Option<(String, Vec<u8>)>, AppError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let payload = match raw.trim().strip_prefix("data:") {
        Some(rest) => rest
            .split_once(";base64,")
            .map(|(_, data)| data)
            .ok_or_else(|| AppError::Validation("Unsupported media data URL".into()))?,
        None => raw,
    };
    let encoded: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if encoded.is_empty() {
        return Ok(None);
    }
    let bytes = Base64::decode_vec(&encoded)
        .map_err(|_| AppError::Validation("media_base64 is not valid base64".into()))?;
    Ok(Some((encoded, bytes)))
}
