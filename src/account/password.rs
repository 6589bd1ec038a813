/// Secret hashing for credential records (Argon2id, PHC string format)
use crate::error::{HubError, HubResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Hashes and verifies shared secrets
#[derive(Clone, Default)]
pub struct SecretHasher {
    argon2: Argon2<'static>,
}

impl SecretHasher {
    /// Hasher with the library's recommended Argon2id parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum-cost parameters, for tests and demo seeding only
    pub fn low_cost() -> HubResult<Self> {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None)
            .map_err(|e| HubError::PasswordHash(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a secret with a fresh random salt
    pub fn hash(&self, secret: &str) -> HubResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HubError::PasswordHash(format!("Password hashing failed: {}", e)))
    }

    /// Check a secret against a stored PHC hash
    ///
    /// A mismatch is `Ok(false)`; only a malformed hash is an error.
    pub fn verify(&self, secret: &str, hash: &str) -> HubResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| HubError::PasswordHash(format!("Malformed password hash: {}", e)))?;

        match self.argon2.verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HubError::PasswordHash(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}
