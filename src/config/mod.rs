//! Configuration for Veranda components.
//!
//! This module handles the settings consumed by the view subsystem and the
//! host selector:
//! - Settings structs and file loading in [`settings`]
//! - TTL expression parsing in [`ttl`]
//!
//! Settings files are JSON. TTL strings are parsed into structured
//! [`chrono::Duration`] values once, at configuration time, never per render
//! call.
//!
//! # Example
//!
//! ```
//! use veranda::config::{load_settings, parse_ttl};
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("veranda.json");
//! fs::write(&path, r#"{"view": {"paths": ["/app/views"], "cache_ttl": "+5 minutes"}}"#).unwrap();
//!
//! let settings = load_settings(&path).unwrap();
//! let ttl = parse_ttl(settings.view.cache_ttl.as_deref().unwrap()).unwrap();
//! assert_eq!(ttl.num_minutes(), 5);
//! ```

pub mod settings;
pub mod ttl;

pub use settings::{load_settings, EnvironmentSettings, Settings, ViewSettings};
pub use ttl::parse_ttl;
