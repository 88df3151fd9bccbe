//! Credential strength scoring
//!
//! Five independent rules, one point each. The result carries the score and
//! the feedback of every unmet rule, in rule order.

mod evaluator;
mod sections;

pub use evaluator::evaluate_strength;
pub use sections::SPECIAL_CHARACTERS;

#[cfg(feature = "async")]
pub use evaluator::evaluate_strength_tx;

/// Number of scoring rules, and therefore the maximum score.
pub const MAX_SCORE: u8 = 5;

/// Outcome of scoring a credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrengthResult {
    /// Satisfied rules, `0..=5`. Zero for an empty credential.
    pub score: u8,
    /// Messages for unmet rules. Empty for an empty credential.
    pub feedback: Vec<String>,
}

impl StrengthResult {
    pub fn band(&self) -> StrengthBand {
        StrengthBand::from_score(self.score)
    }
}

/// Presentation tier of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrengthBand {
    None,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => StrengthBand::None,
            1 | 2 => StrengthBand::Weak,
            3 => StrengthBand::Fair,
            4 => StrengthBand::Good,
            _ => StrengthBand::Strong,
        }
    }

    /// Display label; `None` has no label.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            StrengthBand::None => None,
            StrengthBand::Weak => Some("Weak"),
            StrengthBand::Fair => Some("Fair"),
            StrengthBand::Good => Some("Good"),
            StrengthBand::Strong => Some("Strong"),
        }
    }
}
