use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ApiError;

/// Returns the PHC string stored in `users.password`.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// False for a mismatch and for a stored value that is not a valid hash.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hashed) else {
        tracing::warn!("Stored password is not a valid Argon2 hash");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_exact_password() {
        let hashed = hash_password("Secret").unwrap();
        assert_ne!(hashed, "Secret");
        assert!(verify_password("Secret", &hashed));
        assert!(!verify_password("secret", &hashed));
        assert!(!verify_password("Secret ", &hashed));
    }

    #[test]
    fn plain_stored_value_never_verifies() {
        assert!(!verify_password("Secret", "Secret"));
    }
}
