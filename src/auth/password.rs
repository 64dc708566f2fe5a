use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::config::PasswordConfig;

/// Argon2id hashing with configurable cost. Both operations run on the blocking pool.
#[derive(Debug, Clone)]
pub struct Passwords {
    params: Params,
    dummy_hash: String,
}

impl Passwords {
    pub fn new(cfg: &PasswordConfig) -> anyhow::Result<Self> {
        let params = Params::new(cfg.memory_kib, cfg.iterations, cfg.parallelism, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 params: {e}"))?;
        let dummy_hash = hash_password("no account has this password", params.clone())?;
        Ok(Self { params, dummy_hash })
    }

    pub async fn hash(&self, plain: String) -> anyhow::Result<String> {
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || hash_password(&plain, params)).await?
    }

    pub async fn verify(&self, plain: String, hash: String) -> anyhow::Result<bool> {
        tokio::task::spawn_blocking(move || verify_password(&plain, &hash)).await?
    }

    /// Spends the same argon2 work as `verify` for a login whose email has no account.
    /// Always returns `false`.
    pub async fn verify_absent(&self, plain: String) -> anyhow::Result<bool> {
        self.verify(plain, self.dummy_hash.clone()).await?;
        Ok(false)
    }
}

fn hash_password(plain: &str, params: Params) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// The stored PHC string carries its own parameters, so verification needs no config.
fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
