//! Autofill suggestions
//!
//! Ranks previously accepted values of a field against the current input and
//! records new acceptances.

mod email;

pub use email::{domain_suggestions, COMMON_DOMAINS};

use std::sync::Mutex;

use crate::config::AssistConfig;
use crate::history::FieldHistory;
use crate::store::KeyValueStore;

/// Inputs shorter than this (in characters) produce no suggestions.
pub const MIN_INPUT_LEN: usize = 2;

/// Maximum number of suggestions returned per query.
pub const MAX_SUGGESTIONS: usize = 3;

const PREFIX_CONFIDENCE: f64 = 0.9;
const SUBSTRING_CONFIDENCE: f64 = 0.6;

/// Field that gets email domain completion.
pub const EMAIL_FIELD: &str = "email";

/// A candidate completion with a heuristic confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub value: String,
    pub confidence: f64,
}

impl Suggestion {
    pub fn new(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Suggestion ranker over a [`KeyValueStore`].
///
/// Storage failures never reach the caller: unreadable history is treated as
/// empty and failed writes are dropped.
pub struct SuggestionStore<S> {
    store: S,
    config: AssistConfig,
    // serializes the read-modify-write of acceptance
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> SuggestionStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, AssistConfig::default())
    }

    pub fn with_config(store: S, config: AssistConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self, field: &str) -> FieldHistory {
        match self.store.get(&self.config.history_key(field)) {
            Ok(raw) => FieldHistory::decode(raw.as_deref()),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Failed to read history for field {}: {}", field, _e);
                FieldHistory::default()
            }
        }
    }

    fn save(&self, field: &str, history: &FieldHistory) {
        let result = history
            .encode()
            .map_err(Into::into)
            .and_then(|raw| self.store.set(&self.config.history_key(field), &raw));

        if let Err(_e) = result {
            #[cfg(feature = "tracing")]
            tracing::warn!("Failed to persist history for field {}: {}", field, _e);
        }
    }

    /// Returns up to [`MAX_SUGGESTIONS`] completions for `input` in `field`.
    ///
    /// History entries containing the input (case-insensitive) come first, in
    /// history order; prefix matches get 0.9 confidence, other matches 0.6.
    /// For the `email` field, known domains matching the text after `@` follow
    /// at 0.8, even when history already returned the same address.
    /// A blank field name yields nothing.
    pub fn get_suggestions(&self, field: &str, input: &str) -> Vec<Suggestion> {
        if field.trim().is_empty() || input.chars().count() < MIN_INPUT_LEN {
            return Vec::new();
        }

        let needle = input.to_lowercase();
        let mut suggestions: Vec<Suggestion> = self
            .load(field)
            .into_values()
            .into_iter()
            .filter_map(|value| {
                let lowered = value.to_lowercase();
                if lowered.starts_with(&needle) {
                    Some(Suggestion::new(value, PREFIX_CONFIDENCE))
                } else if lowered.contains(&needle) {
                    Some(Suggestion::new(value, SUBSTRING_CONFIDENCE))
                } else {
                    None
                }
            })
            .collect();

        if field == EMAIL_FIELD && input.contains('@') {
            suggestions.extend(domain_suggestions(input));
        }

        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }

    /// Records `value` as the most recent accepted value of `field`.
    ///
    /// Blank field names and blank values are ignored.
    pub fn accept_suggestion(&self, field: &str, value: &str) {
        if field.trim().is_empty() || value.trim().is_empty() {
            return;
        }

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut history = self.load(field);
        history.record(value.to_string());
        self.save(field, &history);
    }

    /// Current history of `field`, most recent first.
    pub fn history(&self, field: &str) -> Vec<String> {
        self.load(field).into_values()
    }

    /// Forgets every accepted value of `field`.
    pub fn clear_history(&self, field: &str) {
        if field.trim().is_empty() {
            return;
        }

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.save(field, &FieldHistory::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use std::sync::Arc;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }
    }

    fn store_with(field: &str, accepted: &[&str]) -> SuggestionStore<MemoryStore> {
        let store = SuggestionStore::new(MemoryStore::new());
        for value in accepted {
            store.accept_suggestion(field, value);
        }
        store
    }

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.value.as_str()).collect()
    }

    #[test]
    fn test_short_input_yields_nothing() {
        let store = store_with("name", &["alice"]);
        assert!(store.get_suggestions("name", "").is_empty());
        assert!(store.get_suggestions("name", "a").is_empty());
        assert_eq!(store.get_suggestions("name", "al").len(), 1);
    }

    #[test]
    fn test_unknown_field_yields_nothing() {
        let store = SuggestionStore::new(MemoryStore::new());
        assert!(store.get_suggestions("city", "Rome").is_empty());
    }

    #[test]
    fn test_prefix_beats_substring() {
        // accepted oldest first, so history is ["alice@x.com", "malice@x.com"]
        let store = store_with("contact", &["malice@x.com", "alice@x.com"]);

        let result = store.get_suggestions("contact", "ali");
        assert_eq!(values(&result), ["alice@x.com", "malice@x.com"]);
        assert_eq!(result[0].confidence, 0.9);
        assert_eq!(result[1].confidence, 0.6);
    }

    #[test]
    fn test_history_order_is_kept() {
        // substring match accepted last stays ahead of an older prefix match
        let store = store_with("contact", &["alice@x.com", "malice@x.com"]);

        let result = store.get_suggestions("contact", "ali");
        assert_eq!(values(&result), ["malice@x.com", "alice@x.com"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let store = store_with("name", &["Maria Rossi"]);
        let result = store.get_suggestions("name", "mAR");
        assert_eq!(values(&result), ["Maria Rossi"]);
        assert_eq!(result[0].confidence, 0.9);
    }

    #[test]
    fn test_results_truncated_to_three() {
        let store = store_with("city", &["Milano", "Milazzo", "Mileto", "Militello"]);
        let result = store.get_suggestions("city", "mil");
        assert_eq!(result.len(), MAX_SUGGESTIONS);
        assert_eq!(values(&result), ["Militello", "Mileto", "Milazzo"]);
    }

    #[test]
    fn test_email_domain_synthesis() {
        let store = SuggestionStore::new(MemoryStore::new());
        let result = store.get_suggestions("email", "bob@gm");
        assert!(result.contains(&Suggestion::new("bob@gmail.com", 0.8)));
    }

    #[test]
    fn test_email_domains_follow_history() {
        let store = store_with("email", &["bob@hotmail.com"]);
        let result = store.get_suggestions("email", "bob@");
        assert_eq!(values(&result), ["bob@hotmail.com", "bob@gmail.com", "bob@yahoo.com"]);
        assert_eq!(result[0].confidence, 0.9);
        assert_eq!(result[1].confidence, 0.8);
    }

    #[test]
    fn test_email_domains_repeat_history_match() {
        let store = store_with("email", &["bob@gmail.com"]);
        let result = store.get_suggestions("email", "bob@");
        assert_eq!(
            result,
            [
                Suggestion::new("bob@gmail.com", 0.9),
                Suggestion::new("bob@gmail.com", 0.8),
                Suggestion::new("bob@yahoo.com", 0.8),
            ]
        );
    }

    #[test]
    fn test_history_can_crowd_out_domains() {
        let store = store_with("email", &["bob@a.it", "bob@b.it", "bob@c.it"]);
        let result = store.get_suggestions("email", "bob@");
        assert_eq!(values(&result), ["bob@c.it", "bob@b.it", "bob@a.it"]);
    }

    #[test]
    fn test_domains_only_for_email_field() {
        let store = SuggestionStore::new(MemoryStore::new());
        assert!(store.get_suggestions("username", "bob@gm").is_empty());
    }

    #[test]
    fn test_history_bound() {
        let store = SuggestionStore::new(MemoryStore::new());
        for i in 0..12 {
            store.accept_suggestion("email", &format!("user{}@x.com", i));
        }

        let history = store.history("email");
        assert_eq!(history.len(), 10);
        let expected: Vec<String> = (2..12).rev().map(|i| format!("user{}@x.com", i)).collect();
        assert_eq!(history, expected);
    }

    #[test]
    fn test_accept_existing_moves_to_front() {
        let store = store_with("email", &["a@x.com", "b@x.com", "c@x.com"]);
        store.accept_suggestion("email", "a@x.com");
        assert_eq!(store.history("email"), ["a@x.com", "c@x.com", "b@x.com"]);
    }

    #[test]
    fn test_accept_is_idempotent() {
        let once = store_with("email", &["a@x.com", "b@x.com"]);
        let twice = store_with("email", &["a@x.com", "b@x.com", "b@x.com"]);
        assert_eq!(once.history("email"), twice.history("email"));
    }

    #[test]
    fn test_accept_blank_is_noop() {
        let store = store_with("email", &["a@x.com"]);
        store.accept_suggestion("email", "");
        store.accept_suggestion("email", "   ");
        assert_eq!(store.history("email"), ["a@x.com"]);
        store.accept_suggestion("name", "");
        assert_eq!(store.store().get("app_autofill_name").unwrap(), None);
    }

    #[test]
    fn test_accept_blank_field_is_noop() {
        let store = SuggestionStore::new(MemoryStore::new());
        store.accept_suggestion("", "value");
        store.accept_suggestion("  ", "value");

        assert_eq!(store.store().get("app_autofill_").unwrap(), None);
        assert_eq!(store.store().get("app_autofill_  ").unwrap(), None);
        assert!(store.history("").is_empty());
    }

    #[test]
    fn test_blank_field_yields_nothing() {
        let backing = MemoryStore::new();
        backing.set("app_autofill_", r#"["value"]"#).unwrap();
        let store = SuggestionStore::new(backing);

        assert!(store.get_suggestions("", "val").is_empty());

        store.clear_history("");
        assert_eq!(
            store.store().get("app_autofill_").unwrap(),
            Some(r#"["value"]"#.to_string())
        );
    }

    #[test]
    fn test_fields_are_independent() {
        let store = store_with("email", &["a@x.com"]);
        store.accept_suggestion("name", "Anna");
        assert_eq!(store.history("email"), ["a@x.com"]);
        assert_eq!(store.history("name"), ["Anna"]);
    }

    #[test]
    fn test_history_persisted_under_namespaced_key() {
        let store = SuggestionStore::with_config(
            MemoryStore::new(),
            AssistConfig::default().with_namespace("visa"),
        );
        store.accept_suggestion("email", "a@x.com");
        assert_eq!(
            store.store().get("visa_autofill_email").unwrap(),
            Some(r#"["a@x.com"]"#.to_string())
        );
    }

    #[test]
    fn test_corrupt_history_fails_open() {
        let backing = MemoryStore::new();
        backing.set("app_autofill_email", "not json").unwrap();
        let store = SuggestionStore::new(backing);

        assert!(store.get_suggestions("email", "ab").is_empty());

        store.accept_suggestion("email", "ab@x.com");
        assert_eq!(store.history("email"), ["ab@x.com"]);
    }

    #[test]
    fn test_broken_store_fails_open() {
        let store = SuggestionStore::new(BrokenStore);
        store.accept_suggestion("email", "a@x.com");
        assert!(store.history("email").is_empty());
        assert_eq!(values(&store.get_suggestions("email", "a@gm")), ["a@gmail.com"]);
    }

    #[test]
    fn test_clear_history() {
        let store = store_with("email", &["a@x.com"]);
        store.clear_history("email");
        assert!(store.history("email").is_empty());
    }

    #[test]
    fn test_concurrent_acceptance_keeps_invariants() {
        let store = Arc::new(SuggestionStore::new(MemoryStore::new()));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..20 {
                        store.accept_suggestion("email", &format!("u{}@x.com", (t + i) % 12));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let history = store.history("email");
        assert_eq!(history.len(), 10);
        let mut unique = history.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), history.len());
    }
}
