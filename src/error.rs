use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::estimator::EstimatorError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Email already used")]
    EmailAlreadyUsed,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Missing token")]
    Unauthorized,

    #[error("User not found")]
    UserNotFound,

    #[error("Nutrition estimate unavailable")]
    EstimationFailed(#[source] EstimatorError),

    #[error("Unknown roast mode: {0}")]
    InvalidRoastMode(String),

    #[error("{0}")]
    Validation(String),

    #[error("Storage error")]
    Storage(#[from] sqlx::Error),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmailAlreadyUsed => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::EstimationFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidRoastMode(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::EstimationFailed(e) => error!(error = %e, "estimator call failed"),
            AppError::Storage(e) => error!(error = %e, "storage error"),
            AppError::Internal(e) => error!(error = ?e, "internal error"),
            _ => {}
        }

        (status, self.to_string()).into_response()
    }
}
