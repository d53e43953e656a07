//! One-way password hashing and verification.

use crate::error::{PlannerError, PlannerResult};
use rand::Rng;

/// Hash a password with Argon2 and a random 16-byte salt.
///
/// Returns the self-describing encoded form (algorithm, parameters, and
/// salt included), suitable for storage. The plaintext is never stored or
/// logged anywhere in this crate.
pub fn hash(password: &str) -> PlannerResult<String> {
    let salt: [u8; 16] = rand::thread_rng().gen();
    argon2::hash_encoded(password.as_bytes(), &salt, &argon2::Config::default())
        .map_err(|e| PlannerError::Hash(e.to_string()))
}

/// Verify a candidate password against an encoded hash.
///
/// The comparison happens inside the argon2 crate in constant time. A
/// malformed hash verifies as false rather than erroring, so callers see
/// one uniform failure path.
pub fn verify(encoded: &str, candidate: &str) -> bool {
    argon2::verify_encoded(encoded, candidate.as_bytes()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_verifies() {
        let encoded = hash("correct horse battery staple").unwrap();
        assert!(verify(&encoded, "correct horse battery staple"));
    }

    #[test]
    fn wrong_password_fails() {
        let encoded = hash("correct horse battery staple").unwrap();
        assert!(!verify(&encoded, "correct horse battery stapl"));
        assert!(!verify(&encoded, ""));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("same password").unwrap();
        let b = hash("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_false_not_a_panic() {
        assert!(!verify("not-an-argon2-hash", "anything"));
        assert!(!verify("", "anything"));
    }

    #[test]
    fn hash_is_not_the_plaintext() {
        let encoded = hash("hunter2").unwrap();
        assert!(!encoded.contains("hunter2"));
    }
}
