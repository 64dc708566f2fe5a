use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use super::{
    dto::{CreateEntryRequest, EntryView},
    services,
};
use crate::{auth::jwt::AuthUser, error::AppError, state::AppState};

pub fn entry_routes() -> Router<AppState> {
    Router::new().route("/entries", get(list_entries).post(create_entry))
}

#[instrument(skip(state, email))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<EntryView>>, AppError> {
    services::list_entries(&state, &email).await.map(Json)
}

#[instrument(skip(state, email, body), fields(food = %body.name))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(body): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<EntryView>), AppError> {
    let view = services::create_entry(&state, &email, body).await?;
    Ok((StatusCode::CREATED, Json(view)))
}
