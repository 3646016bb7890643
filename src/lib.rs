#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # configurable
//!
//! Class-scoped configuration with locked schemas and validated overrides.
//!
//! An owning type declares its default configuration shape once; consumers
//! later override individual values; and every reader sees a single merged,
//! validated view. The key set of each configuration node is frozen by the
//! declaration: reading or writing a key that was never declared fails
//! immediately, at any nesting depth, which turns configuration typos into
//! errors at the offending call site instead of silent misconfiguration.
//!
//! ## Core Types
//!
//! - [`Shape`], [`Value`], [`Scalar`]: the raw, unlocked input form
//! - [`ConfigStore`] and [`ConfigValue`]: the schema-locked value tree
//! - [`ConfigRegistry`]: the owning-type to store association
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use configurable::{ConfigRegistry, Shape};
//!
//! struct HttpClient;
//!
//! let mut registry = ConfigRegistry::new();
//!
//! // Declare the permanent key set and its defaults.
//! registry.declare_defaults::<HttpClient>(
//!     Shape::new()
//!         .with("base_url", "http://localhost")
//!         .with("retries", 3)
//!         .with("timeouts", Shape::new().with("connect_ms", 500)),
//! );
//!
//! // Later, override a subset of the declared keys.
//! registry
//!     .override_with::<HttpClient>(Shape::new().with("retries", 5))
//!     .unwrap();
//!
//! let config = registry.current::<HttpClient>().unwrap();
//! assert_eq!(config["retries"].as_i64(), Some(5));
//! assert_eq!(config["timeouts"]["connect_ms"].as_i64(), Some(500));
//!
//! // Undeclared keys are rejected, however deep.
//! assert!(config.get("retrys").unwrap_err().is_key_not_found());
//! ```

pub mod error;
pub mod registry;
pub mod store;
pub mod value;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use registry::ConfigRegistry;
pub use store::{ConfigStore, ConfigValue};
pub use value::{Scalar, Shape, Value};
