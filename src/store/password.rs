//! Password hashes.
//!
//! Stored form is a bcrypt string (`$2b$<cost>$<salt><hash>`), so the salt
//! and cost travel with the hash.

#[cfg(not(test))]
const COST: u32 = bcrypt::DEFAULT_COST;

// Minimum cost keeps the test suite fast
#[cfg(test)]
const COST: u32 = 4;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, COST)
}

/// Check a password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match bcrypt::verify(password, stored) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable password hash");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("password123").unwrap();

        assert!(verify_password("password123", &stored));
        assert!(!verify_password("password124", &stored));
        assert!(!stored.contains("password123"));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();

        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn test_stored_form_is_bcrypt() {
        let stored = hash_password("password123").unwrap();

        assert!(stored.starts_with("$2b$04$"));
        assert_eq!(stored.len(), 60);
    }

    #[test]
    fn test_malformed_hash_rejected() {
        assert!(!verify_password("pw", "no-separator"));
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "$2b$04$tooshort"));
    }
}
