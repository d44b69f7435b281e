//! Password digests for filestash.
//!
//! Passwords are stored as the lowercase hex SHA-1 digest of the plaintext
//! and compared by equality on lookup.

use sha1::{Digest, Sha1};

/// Hash a password into its stored form.
///
/// # Examples
///
/// ```
/// use filestash::hash_password;
///
/// assert_eq!(hash_password("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
/// ```
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_vectors() {
        assert_eq!(hash_password(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(
            hash_password("abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_password("pw"), hash_password("pw"));
        assert_ne!(hash_password("pw"), hash_password("pw2"));
    }

    #[test]
    fn test_hash_shape() {
        let hash = hash_password("secret");
        assert_eq!(hash.len(), 40);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
