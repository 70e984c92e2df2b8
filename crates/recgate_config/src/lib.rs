//! Configuration model and validation for Recgate.
//!
//! This crate provides:
//! - Typed configuration deserialization via serde
//! - Pure validation producing a [`ValidatedConfig`]
//! - Typed configuration errors
//!
//! # Example
//!
//! ```rust,ignore
//! use recgate_config::Config;
//!
//! let config: Config = serde_json::from_str(input)?;
//! let validated = config.validate()?;
//! assert_eq!(validated.site_id, "01234567-89ab-cdef-0123-456789abcdef");
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod model;
pub mod validate;

pub use error::{ConfigError, Result};
pub use model::{Config, LocationRule, OptionalRule, PageRule, RestRule};
pub use validate::ValidatedConfig;
