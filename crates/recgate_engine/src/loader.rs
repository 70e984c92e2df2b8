//! Tag loader capability.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Ensures the third-party recorder is present and started for a site.
///
/// `activate` must be idempotent: activating an already-active recorder
/// resumes it rather than starting a second one.
pub trait TagLoader: Send + Sync {
    /// Activates (or resumes) recording for `site_id`.
    fn activate(&self, site_id: &str);
}

/// Activate-once loader that latches its first activation.
#[derive(Debug, Default)]
pub struct OnceTagLoader {
    activated: AtomicBool,
}

impl OnceTagLoader {
    /// Creates an inactive loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once `activate` has been called.
    pub fn is_activated(&self) -> bool {
        self.activated.load(Ordering::SeqCst)
    }
}

impl TagLoader for OnceTagLoader {
    fn activate(&self, site_id: &str) {
        if self.activated.swap(true, Ordering::SeqCst) {
            debug!(site_id, "recorder already active, resuming");
        } else {
            info!(site_id, "activating recorder");
        }
    }
}
