//! Probabilistic sampling gate.

use rand::Rng;
use tracing::debug;

/// Rolls the recording dice once for the given percentage rate.
///
/// Draws a uniform integer in `[1, 100]` and returns whether it lies at or
/// below `rate`, so the outcome is true with probability `rate / 100`.
/// A rate of 0 never records and a rate of 100 always records; rates outside
/// that range degenerate the same way. A non-finite rate fails closed.
///
/// Non-cryptographic randomness is sufficient here.
pub fn recording_rate_match(rate: f64, rng: &mut impl Rng) -> bool {
    if !rate.is_finite() {
        debug!(rate, "non-finite recording rate, failing closed");
        return false;
    }
    let draw = rng.gen_range(1..=100_u32);
    f64::from(draw) <= rate
}
