use crate::error::AppError;

/// Hash a plaintext password with a fresh random salt.
///
/// Two calls on the same input produce different digests; the salt is
/// embedded in the output string.
pub fn hash(plaintext: &str) -> Result<String, AppError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored digest.
///
/// bcrypt compares in constant time. A malformed digest is reported as
/// a mismatch, not an error, so callers always get a plain bool.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cost 4 is the bcrypt minimum; DEFAULT_COST is too slow for tests
    fn quick_hash(plaintext: &str) -> String {
        bcrypt::hash(plaintext, 4).unwrap()
    }

    #[test]
    fn test_hash_is_salted() {
        let a = quick_hash("secret1");
        let b = quick_hash("secret1");
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_roundtrip() {
        let digest = quick_hash("secret1");
        assert!(verify("secret1", &digest));
        assert!(!verify("secret2", &digest));
    }

    #[test]
    fn test_verify_malformed_digest() {
        assert!(!verify("secret1", ""));
        assert!(!verify("secret1", "not-a-bcrypt-digest"));
    }
}
