//! Typed configuration model.
//!
//! These types mirror the JSON document a site operator embeds on the page.
//! Field types are enforced at the deserialization boundary, so the decision
//! engine never needs runtime type probes.

use serde::{Deserialize, Serialize};

/// Caller-supplied gate configuration for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Account identifier used to load the recorder and namespace its
    /// session cookie. Must be a strict 8-4-4-4-12 hex identifier.
    pub site_id: String,
    /// Geographic targeting rule. Required.
    pub location_rule: LocationRule,
    /// Page targeting and sampling rules. Defaults to "record everywhere".
    #[serde(default)]
    pub optional_rule: OptionalRule,
    /// Enables diagnostic logging for this visit.
    #[serde(default)]
    pub debug: bool,
}

/// Geographic targeting: include or exclude a set of country codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LocationRule {
    /// If the visitor's country is in `country_codes`, the decision is
    /// `include`; otherwise it is `!include`.
    pub include: bool,
    /// Country codes to match, case-insensitive. Must be non-empty.
    pub country_codes: Vec<String>,
    /// Recording decision applied when every geolocation lookup fails.
    #[serde(default = "default_true")]
    pub should_record_on_error: bool,
}

/// Page targeting rules plus the fallback rate for unmatched pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptionalRule {
    /// Ordered page rules; the first matching rule wins.
    pub page_rules: Vec<PageRule>,
    /// Sampling applied to pages no rule matched.
    pub rest: RestRule,
}

/// One page targeting rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageRule {
    /// Pathname patterns; a pattern with an extension is compared with the
    /// extension stripped. Must be non-empty.
    pub pathnames: Vec<String>,
    /// Percentage probability (0-100) of recording a matching visit.
    pub recording_rate: f64,
}

/// Sampling rate for pages outside every page rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RestRule {
    /// Percentage probability (0-100) of recording an unmatched visit.
    pub recording_rate: f64,
}

const fn default_true() -> bool {
    true
}

impl Default for OptionalRule {
    fn default() -> Self {
        Self {
            page_rules: Vec::new(),
            rest: RestRule {
                recording_rate: 100.0,
            },
        }
    }
}

impl Config {
    /// Creates a configuration with default optional rules and no debug.
    #[must_use]
    pub fn new(site_id: impl Into<String>, location_rule: LocationRule) -> Self {
        Self {
            site_id: site_id.into(),
            location_rule,
            optional_rule: OptionalRule::default(),
            debug: false,
        }
    }

    /// Replaces the page targeting rules.
    #[must_use]
    pub fn with_optional_rule(mut self, optional_rule: OptionalRule) -> Self {
        self.optional_rule = optional_rule;
        self
    }
}

impl LocationRule {
    /// Creates a rule with the default error fallback (record).
    #[must_use]
    pub fn new(include: bool, country_codes: Vec<String>) -> Self {
        Self {
            include,
            country_codes,
            should_record_on_error: true,
        }
    }
}

impl PageRule {
    /// Creates a page rule.
    #[must_use]
    pub fn new(pathnames: Vec<String>, recording_rate: f64) -> Self {
        Self {
            pathnames,
            recording_rate,
        }
    }
}
