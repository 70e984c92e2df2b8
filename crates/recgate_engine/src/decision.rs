//! Per-visit decision orchestration.
//!
//! The control flow is split into two phases so no asynchronous work hides
//! inside construction: a pure synchronous [`evaluate`] that may ask for a
//! location, composed with the asynchronous resolution step driven by
//! [`Controller::run`]. Page and sampling gating happen before any lookup
//! is issued, so an undesired page costs zero network calls.

use crate::error::{EngineError, Result};
use crate::http::{HttpClient, ReqwestClient};
use crate::loader::{OnceTagLoader, TagLoader};
use crate::location::LocationResolver;
use crate::page::evaluate_page;
use crate::session::{CookieSessionStore, SessionStore};
use rand::Rng;
use recgate_config::{Config, ValidatedConfig};
use tracing::debug;

/// Synchronous phase-one outcome for a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Page targeting or sampling rejected the visit; terminal.
    Skip,
    /// Record immediately; an existing session already approved this
    /// visitor, so location is not re-resolved.
    Record,
    /// Record only if the location rule matches once resolved.
    NeedsLocation,
}

/// Final outcome of a visit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The recorder was activated for this visit.
    Recorded,
    /// The recorder was not activated.
    Skipped,
}

/// Runs the synchronous part of the visit decision.
///
/// Rolls the sampling dice at most once, probes the session store, and
/// reports whether the asynchronous location step is still required.
pub fn evaluate(
    config: &ValidatedConfig,
    current_path: &str,
    session: &impl SessionStore,
    rng: &mut impl Rng,
) -> Decision {
    let session_initiated = session.has_session(&config.site_id);
    debug!(session_initiated, "probed recorder session cookie");

    if !evaluate_page(current_path, &config.optional_rule, rng) {
        return Decision::Skip;
    }

    if session_initiated {
        Decision::Record
    } else {
        Decision::NeedsLocation
    }
}

/// Per-visit orchestrator over injected capabilities.
///
/// Each page visit constructs its own controller; nothing is shared
/// across instances.
#[derive(Debug)]
pub struct Controller<C, S, L> {
    config: ValidatedConfig,
    resolver: LocationResolver<C>,
    session: S,
    loader: L,
}

impl<C, S, L> Controller<C, S, L>
where
    C: HttpClient,
    S: SessionStore,
    L: TagLoader,
{
    /// Creates a controller for one visit.
    #[must_use]
    pub fn new(
        config: ValidatedConfig,
        resolver: LocationResolver<C>,
        session: S,
        loader: L,
    ) -> Self {
        Self {
            config,
            resolver,
            session,
            loader,
        }
    }

    /// Returns the validated configuration driving this visit.
    #[must_use]
    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Drives the full visit decision with ambient randomness.
    pub async fn run(&self, current_path: &str) -> Outcome {
        // thread-local rng must be dropped before the suspension point
        let decision = {
            let mut rng = rand::thread_rng();
            evaluate(&self.config, current_path, &self.session, &mut rng)
        };
        self.finish(decision).await
    }

    /// Drives the full visit decision with the given randomness source.
    pub async fn run_with_rng(&self, current_path: &str, rng: &mut impl Rng) -> Outcome {
        let decision = evaluate(&self.config, current_path, &self.session, rng);
        self.finish(decision).await
    }

    async fn finish(&self, decision: Decision) -> Outcome {
        match decision {
            Decision::Skip => Outcome::Skipped,
            Decision::Record => {
                self.loader.activate(&self.config.site_id);
                Outcome::Recorded
            }
            Decision::NeedsLocation => {
                if self
                    .resolver
                    .resolve_and_match(&self.config.location_rule)
                    .await
                {
                    self.loader.activate(&self.config.site_id);
                    Outcome::Recorded
                } else {
                    Outcome::Skipped
                }
            }
        }
    }
}

/// Sole public entry point: validates the configuration and runs one visit
/// decision against the real collaborators.
///
/// `cookie_header` is the visit's `Cookie:` header value, used to detect an
/// existing recording session.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client
/// cannot be built. Lookup failures are not errors; they resolve through
/// the configured fallback.
pub async fn start(config: Config, current_path: &str, cookie_header: &str) -> Result<Outcome> {
    let validated = config.validate()?;
    let client = ReqwestClient::new().map_err(EngineError::Client)?;
    let controller = Controller::new(
        validated,
        LocationResolver::new(client),
        CookieSessionStore::new(cookie_header),
        OnceTagLoader::new(),
    );
    Ok(controller.run(current_path).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use crate::fixtures::{FixedSessionStore, StubHttpClient};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use recgate_config::{LocationRule, OptionalRule, PageRule, RestRule};

    const SITE_ID: &str = "01234567-89ab-cdef-0123-456789abcdef";

    fn validated(optional_rule: OptionalRule, include: bool) -> ValidatedConfig {
        Config::new(SITE_ID, LocationRule::new(include, vec!["us".to_string()]))
            .with_optional_rule(optional_rule)
            .validate()
            .unwrap()
    }

    fn only_page(path: &str, rate: f64) -> OptionalRule {
        OptionalRule {
            page_rules: vec![PageRule::new(vec![path.to_string()], rate)],
            rest: RestRule { recording_rate: 0.0 },
        }
    }

    fn controller(
        config: ValidatedConfig,
        client: StubHttpClient,
        has_session: bool,
    ) -> Controller<StubHttpClient, FixedSessionStore, OnceTagLoader> {
        Controller::new(
            config,
            LocationResolver::new(client),
            FixedSessionStore(has_session),
            OnceTagLoader::new(),
        )
    }

    #[tokio::test]
    async fn undesired_page_issues_no_lookup() {
        let client = StubHttpClient::new(vec![Ok(r#"{"country":"US"}"#.to_string())]);
        let gate = controller(validated(only_page("/x", 100.0), true), client.clone(), false);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = gate.run_with_rng("/elsewhere", &mut rng).await;

        assert_eq!(outcome, Outcome::Skipped);
        assert!(client.requests().is_empty());
        assert!(!gate.loader.is_activated());
    }

    #[tokio::test]
    async fn existing_session_records_without_lookup() {
        let client = StubHttpClient::new(vec![]);
        let gate = controller(validated(only_page("/x", 100.0), true), client.clone(), true);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let outcome = gate.run_with_rng("/x", &mut rng).await;

        assert_eq!(outcome, Outcome::Recorded);
        assert!(client.requests().is_empty());
        assert!(gate.loader.is_activated());
    }

    #[tokio::test]
    async fn new_session_records_on_location_match() {
        let client = StubHttpClient::new(vec![Ok("LOC=US\n".to_string())]);
        let gate = controller(validated(only_page("/x", 100.0), true), client, false);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(gate.run_with_rng("/x", &mut rng).await, Outcome::Recorded);
        assert!(gate.loader.is_activated());
    }

    #[tokio::test]
    async fn new_session_skips_on_location_mismatch() {
        let client = StubHttpClient::new(vec![Ok("LOC=FR\n".to_string())]);
        let gate = controller(validated(only_page("/x", 100.0), true), client, false);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        assert_eq!(gate.run_with_rng("/x", &mut rng).await, Outcome::Skipped);
        assert!(!gate.loader.is_activated());
    }

    #[tokio::test]
    async fn lookup_failures_fall_back_per_config() {
        let failing = || {
            StubHttpClient::new(vec![
                Err(HttpError::Status { code: 500 }),
                Err(HttpError::EmptyBody),
            ])
        };

        let mut config = Config::new(SITE_ID, LocationRule::new(true, vec!["us".to_string()]));
        config.location_rule.should_record_on_error = false;
        let gate = controller(config.validate().unwrap(), failing(), false);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(gate.run_with_rng("/any", &mut rng).await, Outcome::Skipped);

        let config = Config::new(SITE_ID, LocationRule::new(true, vec!["us".to_string()]));
        let gate = controller(config.validate().unwrap(), failing(), false);
        assert_eq!(gate.run_with_rng("/any", &mut rng).await, Outcome::Recorded);
    }

    #[test]
    fn evaluate_reports_location_need() {
        let config = validated(only_page("/x", 100.0), true);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        assert_eq!(
            evaluate(&config, "/x", &FixedSessionStore(false), &mut rng),
            Decision::NeedsLocation
        );
        assert_eq!(
            evaluate(&config, "/x", &FixedSessionStore(true), &mut rng),
            Decision::Record
        );
        assert_eq!(
            evaluate(&config, "/other", &FixedSessionStore(true), &mut rng),
            Decision::Skip
        );
    }
}
