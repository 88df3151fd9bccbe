//! Credential strength evaluator - main evaluation logic.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

use super::sections::{
    digit_section, length_section, lowercase_section, special_section, uppercase_section,
    SectionResult,
};
use super::StrengthResult;

/// Rules in feedback order.
const SECTIONS: [(&str, fn(&SecretString) -> SectionResult); 5] = [
    ("length", length_section),
    ("uppercase", uppercase_section),
    ("lowercase", lowercase_section),
    ("digit", digit_section),
    ("special", special_section),
];

/// Scores `credential` against the five rules.
///
/// An empty credential scores 0 with no feedback, which is distinct from a
/// non-empty credential that meets no rule.
pub fn evaluate_strength(credential: &SecretString) -> StrengthResult {
    if credential.expose_secret().is_empty() {
        return StrengthResult::default();
    }

    let mut score = 0;
    let mut feedback = Vec::new();

    for (_section_name, section_fn) in SECTIONS {
        match section_fn(credential) {
            Some(message) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("strength rule unmet: {}", _section_name);
                feedback.push(message.to_string());
            }
            None => score += 1,
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("strength evaluated: score {}, {} unmet rules", score, feedback.len());

    StrengthResult { score, feedback }
}

/// Async version that sends the evaluation result via channel.
///
/// Scoring is cheap, so there is no delay before evaluating.
#[cfg(feature = "async")]
pub async fn evaluate_strength_tx(credential: &SecretString, tx: mpsc::Sender<StrengthResult>) {
    let evaluation = evaluate_strength(credential);

    if let Err(_e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send strength evaluation result: {}", _e);
    }
}
