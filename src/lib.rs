//! Form input assistance library
//!
//! This library provides two independent helpers for form front ends:
//! per-field autofill suggestions learned from previously accepted values,
//! and password strength scoring.
//!
//! # Features
//!
//! - `async` (default): Enables debounced suggestions and channel-based evaluation
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `INPUT_ASSIST_NAMESPACE`: Storage key namespace (default: `app`)
//! - `INPUT_ASSIST_DEBOUNCE_MS`: Debounce window in milliseconds (default: `150`)
//! - `INPUT_ASSIST_STORE_PATH`: Path used by [`FileStore::open`]
//!   (default: `./assets/input-assist.json`)
//!
//! # Example
//!
//! ```rust
//! use input_assist::{evaluate_strength, MemoryStore, SuggestionStore};
//! use secrecy::SecretString;
//!
//! let suggestions = SuggestionStore::new(MemoryStore::new());
//! suggestions.accept_suggestion("email", "maria@example.com");
//!
//! let ranked = suggestions.get_suggestions("email", "mar");
//! assert_eq!(ranked[0].value, "maria@example.com");
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let result = evaluate_strength(&password);
//! println!("Score: {} ({:?})", result.score, result.band().label());
//! ```

// Internal modules
mod config;
mod history;
mod store;
mod strength;
mod suggestions;

#[cfg(feature = "async")]
mod debounce;

// Public API
pub use config::{AssistConfig, DEBOUNCE_ENV, NAMESPACE_ENV};
pub use history::{FieldHistory, MAX_HISTORY};
pub use store::{get_store_path, FileStore, KeyValueStore, MemoryStore, StoreError, STORE_PATH_ENV};
pub use strength::{evaluate_strength, StrengthBand, StrengthResult, MAX_SCORE, SPECIAL_CHARACTERS};
pub use suggestions::{
    domain_suggestions, Suggestion, SuggestionStore, COMMON_DOMAINS, EMAIL_FIELD, MAX_SUGGESTIONS,
    MIN_INPUT_LEN,
};

#[cfg(feature = "async")]
pub use debounce::{SuggestionBatch, SuggestionDebouncer};

#[cfg(feature = "async")]
pub use strength::evaluate_strength_tx;
