//! Request-field validation rules.
//!
//! Each check returns `Ok(())` or a human-readable explanation. The API
//! layer maps failures to a 422 response.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum password length in characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum password length in characters.
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Session expiration bounds in minutes (5 minutes to one year).
pub const SESSION_EXPIRATION_MIN: i32 = 5;
pub const SESSION_EXPIRATION_MAX: i32 = 525_600;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex must compile"));

static FINGERPRINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z]+$").expect("fingerprint regex must compile"));

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > 256 || !EMAIL_RE.is_match(email) {
        return Err(format!("'{email}' is not a valid email address"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&len) {
        return Err(format!(
            "Password must be between {PASSWORD_MIN_LENGTH} and {PASSWORD_MAX_LENGTH} characters long"
        ));
    }
    Ok(())
}

/// Fingerprints are client-computed digests: 32-64 alphanumeric characters.
pub fn validate_fingerprint(fingerprint: &str) -> Result<(), String> {
    if !(32..=64).contains(&fingerprint.len()) || !FINGERPRINT_RE.is_match(fingerprint) {
        return Err("Fingerprint must be 32-64 alphanumeric characters".to_string());
    }
    Ok(())
}

/// Shared rule for short human-readable labels (user name, folder name,
/// record title).
pub fn validate_label(field: &str, value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len == 0 || len > 128 {
        return Err(format!("{field} must be between 1 and 128 characters long"));
    }
    Ok(())
}

pub fn validate_session_expiration(minutes: i32) -> Result<(), String> {
    if !(SESSION_EXPIRATION_MIN..=SESSION_EXPIRATION_MAX).contains(&minutes) {
        return Err(format!(
            "Session expiration must be between {SESSION_EXPIRATION_MIN} and {SESSION_EXPIRATION_MAX} minutes"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
    }

    #[test]
    fn rejects_bad_email() {
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("spaces in@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
    }

    #[test]
    fn password_bounds() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("exactly8!").is_ok());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn fingerprint_shape() {
        assert!(validate_fingerprint("f1b7e156414663c4b81fbadadedcf01f").is_ok());
        assert!(validate_fingerprint("too-short").is_err());
        assert!(validate_fingerprint(&"g".repeat(32)).is_ok());
        assert!(validate_fingerprint(&"!".repeat(32)).is_err());
    }

    #[test]
    fn expiration_bounds() {
        assert!(validate_session_expiration(4).is_err());
        assert!(validate_session_expiration(5).is_ok());
        assert!(validate_session_expiration(43_800).is_ok());
        assert!(validate_session_expiration(525_601).is_err());
    }
}
