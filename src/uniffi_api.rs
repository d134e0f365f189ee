//! UniFFI API module for Swift and Kotlin bindings.
//!
//! This module exposes the site matching operations via UniFFI for mobile platforms.
//! Single comparisons use plain strings; record filtering uses JSON strings to
//! simplify cross-language marshalling.

use crate::error::MatcherError;
use crate::site_matcher::MatchStrategy;

/// Get the version of the autofill-match-core library.
#[uniffi::export]
pub fn get_core_version() -> String {
    crate::get_core_version().to_string()
}

/// Get all match strategies, in presentation order.
#[uniffi::export]
pub fn get_match_strategies() -> Vec<MatchStrategy> {
    MatchStrategy::ALL.to_vec()
}

/// Parse a persisted strategy name (e.g. "BASE_DOMAIN"), falling back to the
/// default strategy when it is unknown.
#[uniffi::export]
pub fn parse_match_strategy(name: String) -> MatchStrategy {
    MatchStrategy::from_stored_name(Some(&name))
}

/// Check whether a saved website/app identifier matches the current target.
///
/// Blank identifiers and invalid regex patterns never match.
#[uniffi::export]
pub fn matches_site(saved: String, target: String, strategy: MatchStrategy) -> bool {
    crate::site_matcher::matches(&saved, &target, strategy)
}

/// Filter site records for autofill based on the current app/page.
///
/// # Arguments
/// * `input_json` - JSON string with format:
///   ```json
///   {
///     "records": [{"id": "...", "title": "...", "website": "...", "app_package_name": "..."}],
///     "package_name": "com.android.chrome",
///     "identifier": "https://github.com/login",
///     "app_name": "Chrome",
///     "strategy": "base_domain"
///   }
///   ```
///
/// # Returns
/// JSON string with format:
///   ```json
///   {
///     "matched_ids": ["id1", "id2"],
///     "stats": {"package": 0, "domain": 2, "fuzzy": 0}
///   }
///   ```
#[uniffi::export]
pub fn filter_site_records_json(input_json: String) -> Result<String, MatcherError> {
    crate::site_matcher::filter_site_records_json(&input_json).map_err(MatcherError::JsonError)
}

/// Extract the host from a URL or bare domain.
/// Example: "https://www.example.com:8443/path" -> "www.example.com"
#[uniffi::export]
pub fn extract_site_host(identifier: String) -> Option<String> {
    crate::site_matcher::extract_host(&identifier)
}

/// Reduce a host to its registrable domain.
/// Example: "www.example.co.uk" -> "example.co.uk"
#[uniffi::export]
pub fn site_base_domain(host: String) -> String {
    crate::site_matcher::base_domain(&host).to_string()
}

/// Check if an identifier looks like an Android application package name.
#[uniffi::export]
pub fn is_app_package_name(identifier: String) -> bool {
    crate::site_matcher::is_app_package(&identifier)
}

/// Check if a stored account field looks encrypted and needs decryption before display.
#[uniffi::export]
pub fn account_field_looks_encrypted(stored: String) -> bool {
    crate::account_field::looks_encrypted(&stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_match_strategies() {
        let strategies = get_match_strategies();
        assert_eq!(strategies.len(), 6);
        assert_eq!(strategies[0], MatchStrategy::BaseDomain);
    }

    #[test]
    fn test_parse_match_strategy() {
        assert_eq!(parse_match_strategy("STARTS_WITH".to_string()), MatchStrategy::StartsWith);
        assert_eq!(parse_match_strategy("unknown".to_string()), MatchStrategy::BaseDomain);
    }

    #[test]
    fn test_matches_site() {
        assert!(matches_site(
            "example.co.uk".to_string(),
            "www.example.co.uk".to_string(),
            MatchStrategy::BaseDomain
        ));
        assert!(!matches_site("[".to_string(), "anything".to_string(), MatchStrategy::Regex));
    }

    #[test]
    fn test_filter_site_records_json() {
        let input = r#"{
            "records": [{"id": "a", "website": "https://example.com"}],
            "identifier": "https://login.example.com"
        }"#;

        let result = filter_site_records_json(input.to_string());
        assert!(result.is_ok());

        let output: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(output["matched_ids"][0], "a");

        let result = filter_site_records_json("{}".to_string());
        assert!(matches!(result, Err(MatcherError::JsonError(_))));
    }

    #[test]
    fn test_extract_site_host() {
        assert_eq!(
            extract_site_host("https://www.example.com/path".to_string()).as_deref(),
            Some("www.example.com")
        );
        assert_eq!(extract_site_host(String::new()), None);
    }

    #[test]
    fn test_site_base_domain() {
        assert_eq!(site_base_domain("www.example.com".to_string()), "example.com");
        assert_eq!(site_base_domain("github.com".to_string()), "github.com");
    }
}
