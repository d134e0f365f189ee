//! WASM bindings for browser extension.

use wasm_bindgen::prelude::*;

use crate::site_matcher::{
    filter_site_records, MatchStrategy, SiteMatcherInput, SiteMatcherOutput,
};

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Site Matcher WASM Bindings
// ═══════════════════════════════════════════════════════════════════════════════

/// Get the stable keys of all match strategies, in presentation order.
#[wasm_bindgen(js_name = getMatchStrategies)]
pub fn get_match_strategies() -> Vec<String> {
    MatchStrategy::ALL
        .iter()
        .map(|s| s.key().to_string())
        .collect()
}

/// Check a saved identifier against the current target.
///
/// Unknown strategy names fall back to the default strategy (base domain).
#[wasm_bindgen(js_name = matchesSite)]
pub fn matches_site_js(saved: &str, target: &str, strategy: &str) -> bool {
    let strategy = MatchStrategy::from_stored_name(Some(strategy));
    crate::site_matcher::matches(saved, target, strategy)
}

/// Filter site records for autofill.
///
/// Takes a JsValue (SiteMatcherInput) and returns a JsValue (SiteMatcherOutput).
#[wasm_bindgen(js_name = filterSiteRecords)]
pub fn filter_site_records_js(input: JsValue) -> Result<JsValue, JsValue> {
    let input: SiteMatcherInput = serde_wasm_bindgen::from_value(input)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse input: {}", e)))?;

    let output: SiteMatcherOutput = filter_site_records(input);

    serde_wasm_bindgen::to_value(&output)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize output: {}", e)))
}

/// Filter site records using JSON strings (alternative API).
///
/// Takes a JSON string and returns a JSON string.
#[wasm_bindgen(js_name = filterSiteRecordsJson)]
pub fn filter_site_records_json_js(input_json: &str) -> Result<String, JsValue> {
    crate::site_matcher::filter_site_records_json(input_json)
        .map_err(|e| JsValue::from_str(&e))
}

/// Extract the host from a URL or bare domain.
///
/// Returns an empty string when no host can be determined.
#[wasm_bindgen(js_name = extractHost)]
pub fn extract_host_js(identifier: &str) -> String {
    crate::site_matcher::extract_host(identifier).unwrap_or_default()
}

/// Reduce a host to its registrable domain.
///
/// E.g., "sub.example.com" -> "example.com"
/// E.g., "sub.example.co.uk" -> "example.co.uk"
#[wasm_bindgen(js_name = baseDomain)]
pub fn base_domain_js(host: &str) -> String {
    crate::site_matcher::base_domain(host).to_string()
}

/// Check if an identifier looks like an application package name.
#[wasm_bindgen(js_name = isAppPackage)]
pub fn is_app_package_js(identifier: &str) -> bool {
    crate::site_matcher::is_app_package(identifier)
}

/// Check if a stored account field looks like an encrypted payload that must be
/// decrypted before display.
#[wasm_bindgen(js_name = looksEncrypted)]
pub fn looks_encrypted_js(stored: &str) -> bool {
    crate::account_field::looks_encrypted(stored)
}
