use base64::{engine::general_purpose::STANDARD, Engine as _};
use bcrypt::Version;
use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::MinterError;

/// Base64 of the bcrypt crypt string and of the salt it was made with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HashedPassword {
    #[schema(example = "JDJiJDEyJC4uLg==")]
    pub hash: String,
    pub salt: String,
}

pub trait PasswordHasher: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<HashedPassword, MinterError>;

    /// `Ok(false)` for a wrong password; an error only when `encoded_hash`
    /// is not something [`hash_password`](Self::hash_password) produced.
    fn verify_password(&self, password: &str, encoded_hash: &str) -> Result<bool, MinterError>;
}

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash_password(&self, password: &str) -> Result<HashedPassword, MinterError> {
        let mut salt = [0u8; 16];
        rand::rng().fill(&mut salt);

        let parts = bcrypt::hash_with_salt(password, self.cost, salt)
            .map_err(|e| MinterError::Hashing(e.to_string()))?;
        let salt_str = format!("$2b${:02}${}", parts.get_cost(), parts.get_salt());

        Ok(HashedPassword {
            hash: STANDARD.encode(parts.format_for_version(Version::TwoB)),
            salt: STANDARD.encode(salt_str),
        })
    }

    fn verify_password(&self, password: &str, encoded_hash: &str) -> Result<bool, MinterError> {
        let raw = STANDARD
            .decode(encoded_hash.trim())
            .map_err(|e| MinterError::MalformedHash(e.to_string()))?;
        let crypt = String::from_utf8(raw)
            .map_err(|_| MinterError::MalformedHash("hash is not valid UTF-8".to_string()))?;

        bcrypt::verify(password, &crypt).map_err(|e| MinterError::MalformedHash(e.to_string()))
    }
}
