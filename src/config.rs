//! Runtime configuration for the suggestion engine.

use std::time::Duration;

/// Environment variable overriding the storage key namespace.
pub const NAMESPACE_ENV: &str = "INPUT_ASSIST_NAMESPACE";

/// Environment variable overriding the debounce window, in milliseconds.
pub const DEBOUNCE_ENV: &str = "INPUT_ASSIST_DEBOUNCE_MS";

const DEFAULT_NAMESPACE: &str = "app";
const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Settings shared by the suggestion store and the debouncer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistConfig {
    /// Prefix of every storage key (`<namespace>_autofill_<field>`).
    pub namespace: String,
    /// Quiet period after the last input change before suggestions are computed.
    pub debounce: Duration,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl AssistConfig {
    /// Builds a config from the environment.
    ///
    /// Priority:
    /// 1. `INPUT_ASSIST_NAMESPACE` / `INPUT_ASSIST_DEBOUNCE_MS`
    /// 2. Defaults (`app`, 150 ms)
    ///
    /// Blank namespaces and unparsable durations fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let namespace = std::env::var(NAMESPACE_ENV)
            .ok()
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty())
            .unwrap_or(defaults.namespace);

        let debounce = match std::env::var(DEBOUNCE_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Ignoring invalid {}={:?}: {}", DEBOUNCE_ENV, raw, _e);
                    defaults.debounce
                }
            },
            Err(_) => defaults.debounce,
        };

        Self { namespace, debounce }
    }

    /// Returns a copy of this config with a different namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Storage key holding the history of `field`.
    pub fn history_key(&self, field: &str) -> String {
        format!("{}_autofill_{}", self.namespace, field)
    }
}
