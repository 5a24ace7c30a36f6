//! Canonical username rule.
//!
//! A username may contain lowercase letters, digits, dots, and underscores,
//! and is at most [`MAX_USERNAME_LEN`] characters. The rule lives here so
//! registration and availability checks cannot drift apart.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum username length in characters.
pub const MAX_USERNAME_LEN: usize = 32;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9._]+$").expect("valid regex"));

/// Validate a username against the canonical rule.
///
/// Returns `Ok(())` when the username is acceptable, or `Err` with a
/// human-readable explanation suitable for returning to the client.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(format!(
            "Username must not exceed {MAX_USERNAME_LEN} characters"
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username can only contain lowercase letters, digits, dots (.) and underscores (_)"
                .to_string(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_usernames() {
        for name in ["alice", "bob_2", "j.doe", "user_1.2", "a", "123"] {
            assert!(validate_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn accepts_max_length() {
        let name = "a".repeat(MAX_USERNAME_LEN);
        assert!(validate_username(&name).is_ok());
    }

    #[test]
    fn rejects_too_long() {
        let name = "a".repeat(MAX_USERNAME_LEN + 1);
        let err = validate_username(&name).unwrap_err();
        assert!(err.contains("32"), "error should state the limit: {err}");
    }

    #[test]
    fn rejects_empty() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn rejects_bad_charset() {
        for name in ["Alice", "bob smith", "éléonore", "x@y", "tab\there", "dash-ed"] {
            assert!(validate_username(name).is_err(), "{name} should be invalid");
        }
    }
}
