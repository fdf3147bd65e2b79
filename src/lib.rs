//! Veranda - template view resolution and rendering cache with host
//! environment selection.
//!
//! Veranda provides the resolution-and-caching layer that sits above a
//! template syntax: logical view names are resolved to files across an
//! ordered list of lookup directories, rendered through a wrapper/layout
//! pipeline, and optionally memoized to a backing store with a TTL. A
//! sibling host selector matches the running machine against registered
//! environment configurations and loads a per-host bootstrap.
//!
//! # Modules
//!
//! - [`config`] - Settings structs, loading, and TTL expression parsing
//! - [`error`] - Error types and result aliases
//! - [`events`] - Fire-and-forget lifecycle event hooks
//! - [`host`] - Host environment registry, matching, and selection
//! - [`storage`] - Backing key/value store contract and implementations
//! - [`view`] - Descriptor, resolver, render pipeline, and render cache
//!
//! # Example
//!
//! ```
//! use veranda::config::parse_ttl;
//!
//! // TTL expressions are parsed once at configuration time
//! let ttl = parse_ttl("+5 minutes").unwrap();
//! assert_eq!(ttl.num_seconds(), 300);
//! ```
//!
//! For end-to-end rendering against a directory of templates, see the
//! integration tests.

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod storage;
pub mod view;

pub use error::{Result, VerandaError};
