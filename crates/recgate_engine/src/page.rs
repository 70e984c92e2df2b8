//! Page targeting.
//!
//! Page rules are evaluated in order and the first rule whose pathnames
//! match the current path wins. The sampling dice are thrown exactly once
//! per visit: a matched rule whose roll fails is a terminal "no" and never
//! falls through to the rest rate, so a visitor gets no better odds from
//! several rules matching the same path.

use crate::sample::recording_rate_match;
use rand::Rng;
use recgate_config::OptionalRule;
use tracing::debug;

/// Returns true when the current path matches any of the given patterns.
///
/// Comparison is case-insensitive. A pattern containing an extension
/// separator is compared with everything from the first `.` stripped, so
/// `/about.html` and `/about` both match a current path of `/about`.
pub fn match_path(current: &str, pathnames: &[String]) -> bool {
    let current = current.to_lowercase();
    pathnames.iter().any(|pattern| {
        let pattern = pattern.to_lowercase();
        pattern
            .find('.')
            .map_or(pattern == current, |dot| pattern[..dot] == current)
    })
}

/// Decides whether the current page is desired for recording.
///
/// Iterates the page rules in order; the first match rolls its own
/// recording rate and that single outcome is final. Pages outside every
/// rule roll the rest rate instead.
pub fn evaluate_page(current_path: &str, optional_rule: &OptionalRule, rng: &mut impl Rng) -> bool {
    for rule in &optional_rule.page_rules {
        if match_path(current_path, &rule.pathnames) {
            let sampled = recording_rate_match(rule.recording_rate, rng);
            debug!(
                path = current_path,
                rate = rule.recording_rate,
                sampled,
                "page matched in rule set"
            );
            return sampled;
        }
    }

    let sampled = recording_rate_match(optional_rule.rest.recording_rate, rng);
    debug!(
        path = current_path,
        rate = optional_rule.rest.recording_rate,
        sampled,
        "page not matched in rule set, using rest rate"
    );
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use recgate_config::{PageRule, RestRule};

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn matches_with_extension_stripped() {
        assert!(match_path("/about", &paths(&["/about.html"])));
        assert!(match_path("/about", &paths(&["/about"])));
        assert!(!match_path("/about", &paths(&["/contact"])));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(match_path("/About", &paths(&["/ABOUT.HTML"])));
    }

    #[test]
    fn matches_any_pattern_in_the_list() {
        assert!(match_path("/blog", &paths(&["/news", "/blog.php"])));
    }

    #[test]
    fn empty_pattern_list_never_matches() {
        assert!(!match_path("/about", &[]));
    }

    #[test]
    fn matched_page_with_zero_rate_never_falls_through_to_rest() {
        let rule = OptionalRule {
            page_rules: vec![PageRule::new(paths(&["/x"]), 0.0)],
            rest: RestRule {
                recording_rate: 100.0,
            },
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!((0..1_000).all(|_| !evaluate_page("/x", &rule, &mut rng)));
        assert!((0..1_000).all(|_| evaluate_page("/y", &rule, &mut rng)));
    }

    #[test]
    fn first_matching_rule_wins() {
        let rule = OptionalRule {
            page_rules: vec![
                PageRule::new(paths(&["/x"]), 100.0),
                PageRule::new(paths(&["/x"]), 0.0),
            ],
            rest: RestRule { recording_rate: 0.0 },
        };
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        assert!(evaluate_page("/x", &rule, &mut rng));
    }

    #[test]
    fn default_rule_records_everywhere() {
        let rule = OptionalRule::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!(evaluate_page("/anything", &rule, &mut rng));
    }

    proptest::proptest! {
        #[test]
        fn any_extension_matches_the_bare_path(
            path in "/[a-z][a-z0-9-]{0,12}",
            ext in "[a-z]{1,5}",
        ) {
            let pattern = format!("{path}.{ext}");
            proptest::prop_assert!(match_path(&path, &[pattern]));
            proptest::prop_assert!(match_path(&path.to_uppercase(), &[path.clone()]));
        }
    }
}
