//! Geolocation resolution and country matching.
//!
//! Lookup sources are tried strictly in order, never in parallel, so
//! provider precedence is deterministic and worst-case latency is bounded
//! additively. The first non-empty successful body settles the lookup;
//! its schema is detected by parse success, not by which source answered.

use crate::http::HttpClient;
use recgate_config::LocationRule;
use serde::Deserialize;
use tracing::{debug, warn};

/// One geolocation lookup source.
#[derive(Debug, Clone)]
pub struct LocationSource {
    /// Human-readable provider name, used in diagnostics only.
    pub name: String,
    /// URL to fetch.
    pub url: String,
}

impl LocationSource {
    /// Creates a source.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The fixed provider list: the CDN trace endpoint first, then the JSON
/// geo-IP API.
#[must_use]
pub fn default_sources() -> Vec<LocationSource> {
    vec![
        LocationSource::new("cdn-trace", "/cdn-cgi/trace"),
        LocationSource::new("ipapi", "https://ipapi.co/json/"),
    ]
}

/// Resolves the visitor's country and matches it against a location rule.
#[derive(Debug, Clone)]
pub struct LocationResolver<C> {
    client: C,
    sources: Vec<LocationSource>,
}

impl<C: HttpClient> LocationResolver<C> {
    /// Creates a resolver over the default provider list.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_sources(client, default_sources())
    }

    /// Creates a resolver over a custom provider list.
    #[must_use]
    pub fn with_sources(client: C, sources: Vec<LocationSource>) -> Self {
        Self { client, sources }
    }

    /// Resolves the visitor's location and returns the recording decision
    /// for the given rule.
    ///
    /// Each failing source advances to the next; exhausting every source
    /// returns the rule's `should_record_on_error` fallback. A body that
    /// matches neither known schema yields no country and therefore the
    /// rule's non-include branch.
    pub async fn resolve_and_match(&self, rule: &LocationRule) -> bool {
        for source in &self.sources {
            debug!(provider = %source.name, "fetching visitor location");
            match self.client.fetch_text(&source.url).await {
                Ok(body) => return match_response(&body, rule),
                Err(err) => {
                    warn!(provider = %source.name, error = %err, "location lookup failed");
                }
            }
        }

        warn!(
            fallback = rule.should_record_on_error,
            "every location lookup failed, applying fallback"
        );
        rule.should_record_on_error
    }
}

/// JSON geo-IP schema: `{"country": "<code>"}`.
#[derive(Debug, Deserialize)]
struct CountryBody {
    country: String,
}

/// Matches a raw lookup response body against the rule.
///
/// Tries the JSON schema first, then the line-oriented `key=value` trace
/// schema with a case-insensitive `LOC` key.
#[must_use]
pub fn match_response(body: &str, rule: &LocationRule) -> bool {
    match extract_country(body) {
        Some(country) => {
            let country = country.trim().to_lowercase();
            let member = rule
                .country_codes
                .iter()
                .any(|code| code.to_lowercase() == country);
            let decision = if member { rule.include } else { !rule.include };
            debug!(%country, member, decision, "matched visitor country against rule");
            decision
        }
        None => {
            debug!("no country in lookup response, using non-include branch");
            !rule.include
        }
    }
}

fn extract_country(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<CountryBody>(body) {
        return Some(parsed.country);
    }
    body.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if key.eq_ignore_ascii_case("loc") {
            Some(value.to_string())
        } else {
            None
        }
    })
}
