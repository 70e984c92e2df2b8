//! Pure configuration validation.
//!
//! Validation consumes the caller's [`Config`] and returns a normalized
//! [`ValidatedConfig`]. Only this module can construct one, so holding a
//! `ValidatedConfig` is the proof that validation ran — there is no
//! mutable "is valid" flag to forget or forge.

use crate::error::{ConfigError, Result};
use crate::model::Config;
use std::ops::Deref;
use tracing::debug;
use uuid::Uuid;

/// A configuration that passed validation and normalization.
///
/// Country codes are lower-cased, so re-validating the inner value is a
/// no-op with respect to the decision outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig(Config);

impl ValidatedConfig {
    /// Consumes the wrapper and returns the normalized configuration.
    #[must_use]
    pub fn into_inner(self) -> Config {
        self.0
    }
}

impl Deref for ValidatedConfig {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Config {
    /// Validates and normalizes this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The site id is not a strict 8-4-4-4-12 hex identifier
    /// - The location rule's country code list is empty
    /// - Any page rule's pathname list is empty
    pub fn validate(mut self) -> Result<ValidatedConfig> {
        if !is_site_id(&self.site_id) {
            return Err(ConfigError::InvalidSiteId(self.site_id));
        }

        if self.location_rule.country_codes.is_empty() {
            return Err(ConfigError::EmptyCountryCodes);
        }

        if let Some(index) = self
            .optional_rule
            .page_rules
            .iter()
            .position(|rule| rule.pathnames.is_empty())
        {
            return Err(ConfigError::EmptyPathnames { index });
        }

        for code in &mut self.location_rule.country_codes {
            *code = code.to_lowercase();
        }

        debug!(
            site_id = %self.site_id,
            page_rules = self.optional_rule.page_rules.len(),
            "configuration validated"
        );
        Ok(ValidatedConfig(self))
    }
}

/// Returns true for a strict hyphenated 8-4-4-4-12 hex identifier.
///
/// The uuid parser also accepts braced, simple, and URN forms, but only the
/// hyphenated form is 36 bytes long, so the length check pins it down.
fn is_site_id(candidate: &str) -> bool {
    candidate.len() == 36 && Uuid::try_parse(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LocationRule, OptionalRule, PageRule, RestRule};
    use proptest::prelude::*;

    const SITE_ID: &str = "01234567-89ab-cdef-0123-456789abcdef";

    fn base_config() -> Config {
        Config::new(SITE_ID, LocationRule::new(true, vec!["US".to_string()]))
    }

    #[test]
    fn accepts_well_formed_config() {
        let validated = base_config().validate().unwrap();
        assert_eq!(validated.site_id, SITE_ID);
    }

    #[test]
    fn lowercases_country_codes() {
        let config = Config::new(
            SITE_ID,
            LocationRule::new(false, vec!["US".to_string(), "Fr".to_string()]),
        );
        let validated = config.validate().unwrap();
        assert_eq!(validated.location_rule.country_codes, vec!["us", "fr"]);
    }

    #[test]
    fn validation_is_idempotent() {
        let once = base_config().validate().unwrap();
        let twice = once.clone().into_inner().validate().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rejects_malformed_site_id() {
        let mut config = base_config();
        config.site_id = "not-a-site-id".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSiteId(_))
        ));
    }

    #[test]
    fn rejects_simple_form_site_id() {
        let mut config = base_config();
        config.site_id = "0123456789abcdef0123456789abcdef".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSiteId(_))
        ));
    }

    #[test]
    fn rejects_empty_country_codes() {
        let mut config = base_config();
        config.location_rule.country_codes.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyCountryCodes)
        ));
    }

    #[test]
    fn rejects_page_rule_without_pathnames() {
        let config = base_config().with_optional_rule(OptionalRule {
            page_rules: vec![
                PageRule::new(vec!["/pricing".to_string()], 50.0),
                PageRule::new(vec![], 10.0),
            ],
            rest: RestRule {
                recording_rate: 100.0,
            },
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPathnames { index: 1 })
        ));
    }

    proptest! {
        #[test]
        fn accepts_any_hyphenated_hex_id(id in "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}") {
            let mut config = base_config();
            config.site_id = id;
            prop_assert!(config.validate().is_ok());
        }

        #[test]
        fn rejects_arbitrary_strings(id in "[a-z ]{0,40}") {
            prop_assume!(!is_site_id(&id));
            let mut config = base_config();
            config.site_id = id;
            prop_assert!(config.validate().is_err());
        }
    }
}
