//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashing is CPU bound, so both operations run on the blocking thread pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use tokio::task;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Hashes passwords with Argon2id using the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher with default Argon2 parameters.
    pub fn new() -> Self {
        Self
    }
}

fn join_error(error: task::JoinError) -> PasswordHasherError {
    PasswordHasherError::hash(format!("hashing task failed: {error}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| PasswordHash::new(hash.to_string()))
                .map_err(|err| PasswordHasherError::hash(err.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        task::spawn_blocking(move || {
            let parsed = password_hash::PasswordHash::new(&encoded)
                .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new()
    }

    #[rstest]
    #[tokio::test]
    async fn hash_verifies_with_the_original_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("correct horse").await.expect("hash");

        assert!(hash.as_str().starts_with("$argon2"));
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
        assert!(!hasher.verify("battery staple", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_are_salted(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("pw").await.expect("hash");
        let second = hasher.hash("pw").await.expect("hash");

        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hashes_are_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("pw", &PasswordHash::new("not-a-phc-string"))
            .await
            .expect_err("malformed hash");

        assert!(matches!(err, PasswordHasherError::MalformedHash { .. }));
    }
}
