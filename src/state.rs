use std::sync::Arc;

use crate::{
    auth::{jwt::JwtKeys, password::Passwords, repo::UserRepo},
    config::AppConfig,
    db::PgStore,
    entries::repo::EntryRepo,
    estimator::{Estimator, GeminiEstimator},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub entries: Arc<dyn EntryRepo>,
    pub estimator: Arc<dyn Estimator>,
    pub passwords: Passwords,
}

impl AppState {
    /// Connects to Postgres, applies migrations and builds the Gemini client.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store = Arc::new(PgStore::connect(&config).await?);
        store.migrate().await?;

        let estimator = Arc::new(GeminiEstimator::new(&config.estimator)?) as Arc<dyn Estimator>;

        Self::from_parts(
            Arc::new(config),
            store.clone() as Arc<dyn UserRepo>,
            store as Arc<dyn EntryRepo>,
            estimator,
        )
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        entries: Arc<dyn EntryRepo>,
        estimator: Arc<dyn Estimator>,
    ) -> anyhow::Result<Self> {
        let passwords = Passwords::new(&config.password)?;
        Ok(Self {
            config,
            users,
            entries,
            estimator,
            passwords,
        })
    }

    pub fn jwt(&self) -> JwtKeys {
        JwtKeys::new(&self.config.jwt)
    }
}
