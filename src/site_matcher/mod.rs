//! Site matching for autofill across all platforms.
//!
//! Decides whether a saved site/app identifier belongs to the current fill target
//! (a browser URL or an application package name) under one of the policies in
//! [`MatchStrategy`].
//!
//! Every failure degrades to "no match": a withheld credential is always preferred
//! over one filled into the wrong site.
//!
//! Record filtering (priority order, each record lands in the first tier it satisfies):
//! 1. Package: stored package name equals the target package
//! 2. Domain: stored website matches the target under the record's strategy
//! 3. Fuzzy: record title contains the target application's name

mod domain;
mod pattern;
mod strategy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

pub use domain::{base_domain, extract_base_domain, extract_host, is_app_package};
pub use pattern::SitePattern;
pub use strategy::{MatchStrategy, StrategyLabel, StrategyLabels};

/// Maximum number of records returned by [`filter_site_records`].
pub const MAX_MATCHED_RECORDS: usize = 10;

/// Log target for matcher diagnostics.
const LOG_TARGET: &str = "DomainMatcher";

/// A single saved-vs-target comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Saved identifier (URL, bare domain, or pattern depending on strategy)
    pub saved: String,
    /// Observed fill target (URL, domain, or package name)
    pub target: String,
    #[serde(default)]
    pub strategy: MatchStrategy,
}

impl MatchRequest {
    pub fn new(saved: impl Into<String>, target: impl Into<String>, strategy: MatchStrategy) -> Self {
        Self {
            saved: saved.into(),
            target: target.into(),
            strategy,
        }
    }

    pub fn is_match(&self) -> bool {
        matches(&self.saved, &self.target, self.strategy)
    }
}

/// Decide whether `target` matches the `saved` identifier under `strategy`.
///
/// Blank identifiers never match, whatever the strategy. An invalid pattern under
/// [`MatchStrategy::Regex`] is logged and treated as a non-match.
pub fn matches(saved: &str, target: &str, strategy: MatchStrategy) -> bool {
    if is_blank(saved) || is_blank(target) {
        return false;
    }

    match strategy {
        MatchStrategy::Never => false,
        MatchStrategy::ExactMatch => eq_ignore_case(saved, target),
        MatchStrategy::StartsWith => target.to_lowercase().starts_with(&saved.to_lowercase()),
        MatchStrategy::Domain => domain_match(saved, target),
        MatchStrategy::BaseDomain => base_domain_match(saved, target),
        MatchStrategy::Regex => regex_match(saved, target),
    }
}

/// Target host is the saved host or one of its subdomains.
/// The leading dot keeps "notexample.com" from matching "example.com".
fn domain_match(saved: &str, target: &str) -> bool {
    let (Some(saved_host), Some(target_host)) = (extract_host(saved), extract_host(target)) else {
        return false;
    };

    let saved_host = saved_host.to_lowercase();
    let target_host = target_host.to_lowercase();

    target_host == saved_host || target_host.ends_with(&format!(".{}", saved_host))
}

fn base_domain_match(saved: &str, target: &str) -> bool {
    let (Some(saved_base), Some(target_base)) =
        (extract_base_domain(saved), extract_base_domain(target))
    else {
        return false;
    };

    eq_ignore_case(&saved_base, &target_base)
}

fn regex_match(pattern: &str, target: &str) -> bool {
    match SitePattern::compile(pattern) {
        Ok(compiled) => compiled.is_full_match(target),
        Err(err) => {
            error!(target: LOG_TARGET, pattern, error = %err, "Invalid regex pattern");
            false
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// A saved credential's site information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Saved website identifier (URL, domain, or pattern)
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub app_package_name: String,
    /// Per-record strategy; falls back to the input strategy when absent
    #[serde(default)]
    pub match_strategy: Option<MatchStrategy>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for record filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMatcherInput {
    /// Saved records to filter
    pub records: Vec<SiteRecord>,
    /// Package name of the application requesting autofill
    #[serde(default)]
    pub package_name: String,
    /// Web domain/URL of the page, or the package name for native apps
    pub identifier: String,
    /// Human-readable name of the requesting application
    #[serde(default)]
    pub app_name: String,
    /// Strategy for records without their own
    #[serde(default)]
    pub strategy: MatchStrategy,
}

/// Per-tier match counts (before truncation).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub package: usize,
    pub domain: usize,
    pub fuzzy: usize,
}

/// Output from record filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteMatcherOutput {
    /// IDs of matched records (max 10), most recently updated first
    pub matched_ids: Vec<String>,
    pub stats: MatchStats,
}

/// Filter saved records down to those that should be offered for the current target.
pub fn filter_site_records(input: SiteMatcherInput) -> SiteMatcherOutput {
    let SiteMatcherInput {
        records,
        package_name,
        identifier,
        app_name,
        strategy,
    } = input;

    // Native apps often only report their package through the identifier
    let target_package = if !is_blank(&package_name) {
        package_name.as_str()
    } else if is_app_package(&identifier) {
        identifier.as_str()
    } else {
        ""
    };
    let app_name = app_name.trim().to_lowercase();

    let mut package_matches: Vec<SiteRecord> = Vec::new();
    let mut domain_matches: Vec<SiteRecord> = Vec::new();
    let mut fuzzy_matches: Vec<SiteRecord> = Vec::new();

    for record in records {
        let record_strategy = record.match_strategy.unwrap_or(strategy);

        if !is_blank(&record.app_package_name) && record.app_package_name == target_package {
            package_matches.push(record);
        } else if !is_blank(&record.website)
            && matches(&record.website, &identifier, record_strategy)
        {
            domain_matches.push(record);
        } else if !app_name.is_empty() && record.title.to_lowercase().contains(&app_name) {
            fuzzy_matches.push(record);
        }
    }

    let stats = MatchStats {
        package: package_matches.len(),
        domain: domain_matches.len(),
        fuzzy: fuzzy_matches.len(),
    };
    debug!(
        target: LOG_TARGET,
        package = stats.package,
        domain = stats.domain,
        fuzzy = stats.fuzzy,
        "Filtered site records"
    );

    let mut selected: Vec<SiteRecord> = package_matches
        .into_iter()
        .chain(domain_matches)
        .chain(fuzzy_matches)
        .take(MAX_MATCHED_RECORDS)
        .collect();

    // Stable: records updated at the same moment keep their tier order
    selected.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    SiteMatcherOutput {
        matched_ids: selected.into_iter().map(|record| record.id).collect(),
        stats,
    }
}

/// Filter site records from JSON input (convenience function for FFI).
pub fn filter_site_records_json(input_json: &str) -> Result<String, String> {
    let input: SiteMatcherInput =
        serde_json::from_str(input_json).map_err(|e| e.to_string())?;
    let output = filter_site_records(input);
    serde_json::to_string(&output).map_err(|e| e.to_string())
}
