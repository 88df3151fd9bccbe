//! Per-field acceptance history.

use serde::{Deserialize, Serialize};

/// Maximum number of values retained per field.
pub const MAX_HISTORY: usize = 10;

/// Previously accepted values for one field, most recent first.
///
/// Never longer than [`MAX_HISTORY`] and never holds the same value twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldHistory {
    values: Vec<String>,
}

impl FieldHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a stored history, falling back to empty when absent or malformed.
    ///
    /// Decoded values are re-normalized so a hand-edited entry cannot break
    /// the length and uniqueness guarantees.
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(values) => {
                let mut history = Self::default();
                for value in values.into_iter().rev() {
                    history.record(value);
                }
                history
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Discarding malformed history: {}", _e);
                Self::default()
            }
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Moves `value` to the front, dropping any earlier copy and anything past the bound.
    pub fn record(&mut self, value: String) {
        self.values.retain(|v| *v != value);
        self.values.insert(0, value);
        self.values.truncate(MAX_HISTORY);
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}
