//! Language table for availability runs.
//!
//! - `registry`: the ordered languages a run checks, their display names, and
//!   the base language every pair is anchored on
//!
//! # Example
//!
//! ```rust,ignore
//! use translator_probe::i18n::LanguageRegistry;
//!
//! let registry = LanguageRegistry::builtin();
//! assert_eq!(registry.total_checks(), registry.len() * 3);
//! ```

mod registry;

pub use registry::{
    display_name, LanguageEntry, LanguageRegistry, BASE_LANGUAGE, BUILTIN_CODES, LANGUAGE_NAMES,
    UNKNOWN_LANGUAGE_NAME,
};
