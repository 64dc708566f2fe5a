mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};

/// Photos arrive inline as base64, so entry bodies get a larger limit than the default.
const MAX_ENTRY_BODY: usize = 20 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    handlers::entry_routes().layer(DefaultBodyLimit::max(MAX_ENTRY_BODY))
}
