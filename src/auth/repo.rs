use async_trait::async_trait;

use super::repo_types::{NewUser, User};
use crate::{db::PgStore, error::AppError};

const USER_COLUMNS: &str = "id, email, username, password_hash, age, gender, weight_kg, \
                            height_cm, activity_level, created_at";

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Inserts a user. Fails with `EmailAlreadyUsed` when the email is taken, including
    /// when a concurrent insert wins the race.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Deletes a user and, through the foreign key, all of their entries.
    /// Returns whether a row was removed.
    async fn delete_by_email(&self, email: &str) -> Result<bool, AppError>;
}

/// A unique violation on insert means a concurrent registration took the email first.
fn insert_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::EmailAlreadyUsed,
        other => AppError::Storage(other),
    }
}

#[async_trait]
impl UserRepo for PgStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(&user.email)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(AppError::EmailAlreadyUsed);
        }

        let created = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(insert_error)?;

        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
