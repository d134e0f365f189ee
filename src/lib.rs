//! Autofill Match Core Library
//!
//! Cross-platform core for deciding which saved credentials belong to the
//! current autofill target, including:
//! - **site_matcher**: Strategy-based matching of saved sites against URLs and app packages
//! - **account_field**: Display resolution for possibly-encrypted username fields
//!
//! This library accepts plain strings (or JSON) and returns plain results.
//! Each platform (browser, Android, .NET) discovers candidates, stores and
//! decrypts credentials itself, and calls this library for the decision.
//!
//! # Example
//! ```
//! use autofill_match_core::{matches, MatchStrategy};
//!
//! assert!(matches("https://bank.example.com", "secure.bank.example.com", MatchStrategy::BaseDomain));
//! assert!(!matches("example.com", "notexample.com", MatchStrategy::Domain));
//! ```

pub mod account_field;
pub mod error;
pub mod site_matcher;

pub use account_field::{looks_encrypted, resolve_account_identifier};
pub use error::{MatcherError, MatcherResult};
pub use site_matcher::{
    base_domain, extract_base_domain, extract_host, filter_site_records, is_app_package, matches,
    MatchRequest, MatchStats, MatchStrategy, SiteMatcherInput, SiteMatcherOutput, SitePattern,
    SiteRecord, StrategyLabel, StrategyLabels, MAX_MATCHED_RECORDS,
};

/// Version of this library, as reported to platform bindings.
pub fn get_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// WASM bindings
#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::*;

// C FFI exports for .NET P/Invoke
#[cfg(feature = "ffi")]
pub mod ffi;

// UniFFI bindings for Swift/Kotlin
#[cfg(feature = "uniffi")]
pub mod uniffi_api;

#[cfg(feature = "uniffi")]
pub use uniffi_api::*;

// UniFFI scaffolding - generates the FFI glue code
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
