//! Salted SHA-256 password hashing.
//!
//! Stored format: `sha256$<salt-hex>$<digest-hex>`. Verification is total:
//! an unrecognized scheme or a malformed stored value verifies as false,
//! never panics, because stored hashes are persisted text of unknown
//! provenance.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Scheme tag carried in stored password hashes.
const SCHEME: &str = "sha256";

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    hash_with_salt(password, &salt)
}

/// Hash a password with the given salt.
fn hash_with_salt(password: &str, salt: &[u8]) -> String {
    format!(
        "{}${}${}",
        SCHEME,
        hex::encode(salt),
        hex::encode(salted_digest(password, salt))
    )
}

/// Compute SHA-256 over salt followed by the password bytes.
fn salted_digest(password: &str, salt: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Verify a password against a stored hash.
///
/// Returns `false` for a wrong password and for any stored value that does
/// not parse as `sha256$<salt-hex>$<digest-hex>`.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(salt_hex), Some(digest_hex), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    if scheme != SCHEME {
        return false;
    }

    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };

    salted_digest(password, &salt).as_slice() == expected.as_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_roundtrip() {
        let stored = hash_password("s3cret");
        assert!(verify_password("s3cret", &stored));
        assert!(!verify_password("wrong", &stored));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same");
        let b = hash_password("same");
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn stored_format_shape() {
        let stored = hash_password("pw");
        let parts: Vec<_> = stored.split('$').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "sha256");
        assert_eq!(parts[1].len(), SALT_LEN * 2);
        assert_eq!(parts[2].len(), 64);
    }

    #[test]
    fn deterministic_for_a_fixed_salt() {
        let salt = [7u8; SALT_LEN];
        assert_eq!(hash_with_salt("pw", &salt), hash_with_salt("pw", &salt));
    }

    #[test]
    fn malformed_stored_values_verify_false() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "plaintext"));
        assert!(!verify_password("pw", "sha256$zz$zz"));
        assert!(!verify_password("pw", "sha256$00"));
        assert!(!verify_password("pw", "sha256$00$00$00"));
        assert!(!verify_password("pw", "md5$00$00"));
    }

    #[test]
    fn empty_password_still_roundtrips() {
        let stored = hash_password("");
        assert!(verify_password("", &stored));
        assert!(!verify_password("x", &stored));
    }
}
