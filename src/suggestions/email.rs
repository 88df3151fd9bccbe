//! Email section - completes the domain part of an email address.

use super::Suggestion;

/// Domains offered when the user has typed an `@`.
pub const COMMON_DOMAINS: [&str; 4] = ["gmail.com", "yahoo.com", "outlook.com", "hotmail.com"];

pub(crate) const DOMAIN_CONFIDENCE: f64 = 0.8;

/// Synthesizes `local@domain` completions for every known domain that starts
/// with what was typed after the `@`.
///
/// Returns nothing when the input has no `@`.
pub fn domain_suggestions(input: &str) -> Vec<Suggestion> {
    let mut parts = input.split('@');
    let local = parts.next().unwrap_or_default();
    let Some(domain_prefix) = parts.next() else {
        return Vec::new();
    };
    let domain_prefix = domain_prefix.to_lowercase();

    COMMON_DOMAINS
        .iter()
        .filter(|domain| domain.starts_with(&domain_prefix))
        .map(|domain| Suggestion::new(format!("{}@{}", local, domain), DOMAIN_CONFIDENCE))
        .collect()
}
