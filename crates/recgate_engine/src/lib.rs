//! Per-visit recording decision engine for Recgate.
//!
//! This crate provides:
//! - Page targeting with extension-stripping path comparison
//! - A probabilistic sampling gate
//! - Asynchronous geolocation resolution with dual-schema parsing
//! - The decision orchestrator tying them together
//!
//! Browser-global side effects live behind the [`HttpClient`],
//! [`SessionStore`], and [`TagLoader`] capability traits, so the engine is
//! fully testable without a host page.
//!
//! # Example
//!
//! ```rust,ignore
//! use recgate_engine::start;
//!
//! let outcome = start(config, "/pricing", cookie_header).await?;
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod decision;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod loader;
pub mod location;
pub mod page;
pub mod sample;
pub mod session;

pub use decision::{evaluate, start, Controller, Decision, Outcome};
pub use error::{EngineError, HttpError, Result};
pub use http::{HttpClient, ReqwestClient};
pub use loader::{OnceTagLoader, TagLoader};
pub use location::{LocationResolver, LocationSource};
pub use page::{evaluate_page, match_path};
pub use sample::recording_rate_match;
pub use session::{CookieSessionStore, SessionStore, SESSION_COOKIE_PREFIX};
