use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{LoginRequest, RegisterRequest, TokenResponse, UserProfile},
    jwt::AuthUser,
    services,
};
use crate::{error::AppError, state::AppState};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me).delete(delete_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let token = services::register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = services::login(&state, payload).await?;
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state, email))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    services::profile(&state, &email).await.map(Json)
}

#[instrument(skip(state, email))]
pub async fn delete_me(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<StatusCode, AppError> {
    services::delete_account(&state, &email).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod me_tests {
    use super::*;

    #[test]
    fn test_profile_serialization() {
        let response = UserProfile {
            id: 7,
            username: "alice".to_string(),
            email: "test@example.com".to_string(),
            age: Some(30),
            gender: None,
            weight_kg: Some(61.5),
            height_cm: None,
            activity_level: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["email"], "test@example.com");
        assert_eq!(json["id"], 7);
        assert_eq!(json["weight_kg"], 61.5);
        assert!(json["gender"].is_null());
    }
}
