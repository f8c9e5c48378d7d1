//! Admin account storage trait.
//!
//! The login screen itself lives in the excluded presentation layer; the
//! core only stores credentials and answers verification queries.

use sha2::{Digest, Sha256};

use super::error::StoreResult;

/// Hex-encoded SHA-256 digest of a password.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Credential storage consumed by the admin login collaborator.
pub trait AdminRepository: Send + Sync {
    /// Create or replace an admin account with the given password.
    fn upsert_admin(&self, username: &str, password: &str) -> StoreResult<()>;

    /// Check a username/password pair against the stored hash.
    ///
    /// Unknown usernames verify as `false` rather than erroring, so the
    /// login screen cannot be used to probe which accounts exist.
    fn verify_admin(&self, username: &str, password: &str) -> StoreResult<bool>;
}
