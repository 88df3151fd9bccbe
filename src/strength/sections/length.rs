//! Length section - checks credential minimum length.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;

pub(crate) const MIN_LENGTH: usize = 8;

/// Checks if the credential has at least [`MIN_LENGTH`] characters.
pub fn length_section(credential: &SecretString) -> SectionResult {
    if credential.expose_secret().chars().count() < MIN_LENGTH {
        return Some("Use at least 8 characters");
    }
    None
}
