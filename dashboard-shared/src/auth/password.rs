/// Password hashing module using bcrypt
///
/// Seeded user passwords are stored as salted bcrypt hashes, never in
/// plaintext. The work factor is passed explicitly so callers decide the
/// cost; the seeder uses [`SEED_PASSWORD_COST`].
///
/// # Example
///
/// ```
/// use dashboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password_123", 4)?;
///
/// assert!(verify_password("super_secret_password_123", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

/// bcrypt work factor used when seeding user passwords
pub const SEED_PASSWORD_COST: u32 = 10;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),

    /// The blocking hashing task panicked or was cancelled
    #[error("Password hashing task failed: {0}")]
    TaskFailed(String),
}

/// Hashes a password with bcrypt at the given cost
///
/// A fresh random salt is generated for every call, so hashing the same
/// password twice yields different strings.
///
/// # Returns
///
/// Modular crypt format hash, e.g.:
/// ```text
/// $2b$10$N9qo8uLOickgx2ZMRZoMye...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::HashError` if the cost is outside bcrypt's
/// accepted range (4..=31) or hashing fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(password, cost)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))
}

/// Hashes a password on the blocking thread pool
///
/// bcrypt is CPU-bound, so a batch of users is hashed off the async
/// worker threads.
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| PasswordError::TaskFailed(e.to_string()))?
}

/// Verifies a password against a bcrypt hash
///
/// # Returns
///
/// `Ok(true)` if password matches, `Ok(false)` if it doesn't match
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))
}
