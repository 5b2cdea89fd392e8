//! Password hashing (bcrypt).
//!
//! bcrypt is CPU-bound, so both directions run on the blocking thread pool to
//! keep the async runtime responsive.

use thiserror::Error;

/// Work factor used when none is configured (matches `genSalt(10)` clients).
pub const DEFAULT_BCRYPT_COST: u32 = 10;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("password must not be empty")]
    Empty,

    #[error("password must be at most {MAX_PASSWORD_BYTES} bytes, got {0}")]
    TooLong(usize),
}

impl PasswordError {
    /// `true` for failures caused by the submitted password itself.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Empty | Self::TooLong(_))
    }
}

/// bcrypt hasher with a fixed cost.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher {
    /// bcrypt accepts costs in `4..=31`; values outside are clamped.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password. The returned string embeds salt and cost.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong(password.len()));
        }

        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || {
            bcrypt::hash(password, cost).map_err(|e| PasswordError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| PasswordError::Hashing(format!("task join error: {e}")))?
    }

    /// Check a plaintext password against a stored hash.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || {
            bcrypt::verify(password, &hash).map_err(|e| PasswordError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| PasswordError::Hashing(format!("task join error: {e}")))?
    }
}
