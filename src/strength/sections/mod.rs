//! Credential scoring rules
//!
//! Each section checks one independent rule and reports its feedback message
//! when the rule is not met.

mod length;
mod variety;

pub use length::length_section;
pub use variety::{
    digit_section, lowercase_section, special_section, uppercase_section, SPECIAL_CHARACTERS,
};

/// Result type for section evaluation functions.
/// - `Some(feedback)` - Rule not met
/// - `None` - Rule met
pub type SectionResult = Option<&'static str>;
