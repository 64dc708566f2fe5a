use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::{
    dto::{LoginRequest, RegisterRequest, UserProfile},
    repo_types::{NewUser, User},
};
use crate::{error::AppError, state::AppState};

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::Validation("Invalid email".into()));
    }
    Ok(email)
}

/// Creates the account and returns a token bound to its email.
pub async fn register(state: &AppState, req: RegisterRequest) -> Result<String, AppError> {
    let email = normalize_email(&req.email)?;
    let username = req.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation("Password too short".into()));
    }

    // Cheap early exit; the storage constraint remains the authority under races.
    if state.users.find_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::EmailAlreadyUsed);
    }

    let password_hash = state.passwords.hash(req.password).await?;
    let user = state
        .users
        .create(NewUser {
            email,
            username,
            password_hash,
        })
        .await?;

    let token = state.jwt().issue(&user.email)?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(token)
}

/// Unknown email and wrong password fail identically.
pub async fn login(state: &AppState, req: LoginRequest) -> Result<String, AppError> {
    let email = req.email.trim().to_lowercase();

    let Some(user) = state.users.find_by_email(&email).await? else {
        state.passwords.verify_absent(req.password).await?;
        warn!(%email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !state
        .passwords
        .verify(req.password, user.password_hash.clone())
        .await?
    {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.jwt().issue(&user.email)?;
    info!(user_id = user.id, "user logged in");
    Ok(token)
}

/// Resolves a verified token subject to a stored user. A valid token does not imply
/// the account still exists.
pub async fn resolve_user(state: &AppState, email: &str) -> Result<User, AppError> {
    state
        .users
        .find_by_email(email)
        .await?
        .ok_or(AppError::UserNotFound)
}

pub async fn profile(state: &AppState, email: &str) -> Result<UserProfile, AppError> {
    resolve_user(state, email).await.map(UserProfile::from)
}

pub async fn delete_account(state: &AppState, email: &str) -> Result<(), AppError> {
    if !state.users.delete_by_email(email).await? {
        return Err(AppError::UserNotFound);
    }
    info!(%email, "account deleted");
    Ok(())
}
