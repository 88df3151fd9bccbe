//! Character variety sections - uppercase, lowercase, digits, special characters.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

fn has(credential: &SecretString, pred: impl Fn(char) -> bool) -> bool {
    credential.expose_secret().chars().any(pred)
}

pub fn uppercase_section(credential: &SecretString) -> SectionResult {
    if has(credential, |c| c.is_ascii_uppercase()) {
        None
    } else {
        Some("Add uppercase letters")
    }
}

pub fn lowercase_section(credential: &SecretString) -> SectionResult {
    if has(credential, |c| c.is_ascii_lowercase()) {
        None
    } else {
        Some("Add lowercase letters")
    }
}

pub fn digit_section(credential: &SecretString) -> SectionResult {
    if has(credential, |c| c.is_ascii_digit()) {
        None
    } else {
        Some("Add numbers")
    }
}

/// Only characters from [`SPECIAL_CHARACTERS`] count; spaces, dashes and
/// underscores do not.
pub fn special_section(credential: &SecretString) -> SectionResult {
    if has(credential, |c| SPECIAL_CHARACTERS.contains(c)) {
        None
    } else {
        Some("Add special characters (!@#$%)")
    }
}
