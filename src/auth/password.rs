use crate::error::{Error, Result};

/// Hash a password with bcrypt off the async runtime
pub async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| Error::Internal(format!("Hashing task failed: {e}")))?
        .map_err(Error::from)
}

/// Check a password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch rather than an error.
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| Error::Internal(format!("Verification task failed: {e}")))?;

    match verified {
        Ok(valid) => Ok(valid),
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            Ok(false)
        }
    }
}
