//! Match strategies and their host-supplied labels.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{MatcherError, MatcherResult};

/// Policy governing how a saved identifier is compared against a live fill target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Same registrable domain (`mail.example.com` ~ `www.example.com`)
    #[default]
    BaseDomain,
    /// Same host or a subdomain of the saved host
    Domain,
    /// Target starts with the saved identifier
    StartsWith,
    /// Identifiers are equal ignoring case
    ExactMatch,
    /// Saved identifier is a pattern that must match the whole target
    Regex,
    /// Never offered for autofill
    Never,
}

impl MatchStrategy {
    /// All strategies, in the order they are presented to users.
    pub const ALL: [MatchStrategy; 6] = [
        MatchStrategy::BaseDomain,
        MatchStrategy::Domain,
        MatchStrategy::StartsWith,
        MatchStrategy::ExactMatch,
        MatchStrategy::Regex,
        MatchStrategy::Never,
    ];

    /// Stable key used for persistence and label lookups.
    pub const fn key(self) -> &'static str {
        match self {
            MatchStrategy::BaseDomain => "base_domain",
            MatchStrategy::Domain => "domain",
            MatchStrategy::StartsWith => "starts_with",
            MatchStrategy::ExactMatch => "exact_match",
            MatchStrategy::Regex => "regex",
            MatchStrategy::Never => "never",
        }
    }

    /// Read a persisted strategy name, falling back to the default strategy
    /// when the name is missing or unknown.
    pub fn from_stored_name(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MatchStrategy {
    type Err = MatcherError;

    /// Accepts `BASE_DOMAIN`, `base_domain`, `BaseDomain` and `base-domain` alike.
    fn from_str(s: &str) -> MatcherResult<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        MatchStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.key().replace('_', "") == normalized)
            .ok_or_else(|| MatcherError::UnknownStrategy(s.to_string()))
    }
}

/// Display text for one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyLabel {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// Localized strategy labels supplied by the host application.
///
/// The core never ships translations; the host builds one table per locale and
/// passes it wherever strategies are rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyLabels {
    labels: HashMap<MatchStrategy, StrategyLabel>,
}

impl StrategyLabels {
    pub fn new(labels: HashMap<MatchStrategy, StrategyLabel>) -> Self {
        Self { labels }
    }

    /// Parse a table such as `{"base_domain": {"display_name": "...", "description": "..."}}`.
    pub fn from_json(json: &str) -> MatcherResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, strategy: MatchStrategy) -> Option<&StrategyLabel> {
        self.labels.get(&strategy)
    }

    /// Display name for a strategy, or its stable key when the host supplied none.
    pub fn display_name(&self, strategy: MatchStrategy) -> &str {
        self.get(strategy)
            .map_or(strategy.key(), |label| label.display_name.as_str())
    }

    /// Description for a strategy, or an empty string when the host supplied none.
    pub fn description(&self, strategy: MatchStrategy) -> &str {
        self.get(strategy)
            .map_or("", |label| label.description.as_str())
    }

    /// Strategies without a label in this table.
    pub fn missing(&self) -> Vec<MatchStrategy> {
        MatchStrategy::ALL
            .into_iter()
            .filter(|strategy| !self.labels.contains_key(strategy))
            .collect()
    }
}
