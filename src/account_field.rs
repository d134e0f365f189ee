//! Display resolution for stored account (username) fields.
//!
//! Older records store the username encrypted, with nothing but the value itself to
//! tell it apart from plain text. The check here is a heuristic on the shape of the
//! value (base64-like padding and length), not a format guarantee: plain usernames
//! can trip it, in which case decryption fails and the raw value is shown.

use std::fmt::Display;

use tracing::warn;

/// Minimum length (exclusive) for a value to be considered an encrypted payload.
const MIN_ENCRYPTED_LEN: usize = 20;

/// Padding marker that base64-encoded ciphertext usually carries.
const ENCRYPTED_MARKER: &str = "==";

const LOG_TARGET: &str = "AccountFieldResolver";

/// Check if a stored field looks like an encrypted payload.
pub fn looks_encrypted(stored: &str) -> bool {
    stored.contains(ENCRYPTED_MARKER) && stored.chars().count() > MIN_ENCRYPTED_LEN
}

/// Resolve a stored username for display.
///
/// Values that look encrypted are passed to `decrypt`; anything else, and any value
/// `decrypt` rejects, is returned unchanged.
pub fn resolve_account_identifier<F, E>(stored_username: &str, decrypt: F) -> String
where
    F: FnOnce(&str) -> Result<String, E>,
    E: Display,
{
    if !looks_encrypted(stored_username) {
        return stored_username.to_string();
    }

    match decrypt(stored_username) {
        Ok(plain) => plain,
        Err(err) => {
            warn!(target: LOG_TARGET, error = %err, "Failed to decrypt account field, using stored value");
            stored_username.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const CIPHERTEXT: &str = "U2FsdGVkX1+abcdefghijklmn==";

    #[test]
    fn test_looks_encrypted() {
        assert!(looks_encrypted(CIPHERTEXT));

        // Marker without length
        assert!(!looks_encrypted("abc=="));
        // Exactly at the threshold is not enough
        assert!(!looks_encrypted("abcdefghijklmnopqr=="));
        assert!(looks_encrypted("abcdefghijklmnopqrs=="));
        // Length without marker
        assert!(!looks_encrypted("a.very.long.username@example.com"));
        assert!(!looks_encrypted(""));
    }

    #[test]
    fn test_decrypts_encrypted_value() {
        let resolved = resolve_account_identifier(CIPHERTEXT, |value| {
            assert_eq!(value, CIPHERTEXT);
            Ok::<_, String>("alice@example.com".to_string())
        });

        assert_eq!(resolved, "alice@example.com");
    }

    #[test]
    fn test_plain_value_is_not_decrypted() {
        let called = Cell::new(false);
        let resolved = resolve_account_identifier("alice@example.com", |_| {
            called.set(true);
            Ok::<_, String>("unexpected".to_string())
        });

        assert_eq!(resolved, "alice@example.com");
        assert!(!called.get());
    }

    #[test]
    fn test_decrypt_failure_falls_back_to_stored_value() {
        let resolved = resolve_account_identifier(CIPHERTEXT, |_| {
            Err::<String, _>("bad padding")
        });

        assert_eq!(resolved, CIPHERTEXT);
    }

    #[test]
    fn test_username_that_only_resembles_ciphertext() {
        let stored = "user==with==equals@example.com";
        let resolved = resolve_account_identifier(stored, |_| Err::<String, _>("not ciphertext"));

        assert_eq!(resolved, stored);
    }
}
