//! Session probe capability.

/// Name prefix of the recorder's session cookie; the full cookie name is
/// the prefix concatenated with the site identifier.
pub const SESSION_COOKIE_PREFIX: &str = "rec_";

/// Reports whether a recording session already exists for a site.
///
/// An existing session means location was already evaluated on a prior
/// visit and recording was approved, so the orchestrator skips re-resolving.
pub trait SessionStore: Send + Sync {
    /// Returns true when a session cookie exists for `site_id`.
    fn has_session(&self, site_id: &str) -> bool;
}

/// Session probe backed by a `Cookie:` header string.
#[derive(Debug, Clone, Default)]
pub struct CookieSessionStore {
    cookies: String,
}

impl CookieSessionStore {
    /// Creates a probe over the given cookie header value.
    #[must_use]
    pub fn new(cookie_header: impl Into<String>) -> Self {
        Self {
            cookies: cookie_header.into(),
        }
    }
}

impl SessionStore for CookieSessionStore {
    fn has_session(&self, site_id: &str) -> bool {
        let marker = format!("{SESSION_COOKIE_PREFIX}{site_id}=");
        self.cookies
            .split(';')
            .any(|cookie| cookie.trim_start().starts_with(&marker))
    }
}
