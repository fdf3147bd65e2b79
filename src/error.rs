//! Error types for Veranda operations.
//!
//! This module defines [`VerandaError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `VerandaError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `VerandaError::Other`) for unexpected errors
//! - Failures are surfaced synchronously to the caller and never retried
//!   internally

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Veranda operations.
#[derive(Debug, Error)]
pub enum VerandaError {
    /// Template could not be located in any lookup path.
    #[error("Template '{template}' not found in {} lookup path(s)", searched.len())]
    TemplateNotFound {
        template: String,
        searched: Vec<PathBuf>,
    },

    /// Template execution failed.
    #[error("Failed to render {path}: {message}")]
    RenderError { path: PathBuf, message: String },

    /// Requested environment host key not registered.
    #[error("Environment host '{key}' does not exist")]
    MissingHost { key: String },

    /// Selected host has no bootstrap file on disk (strict mode).
    #[error("Bootstrap for host '{key}' does not exist: {path}")]
    MissingBootstrap { key: String, path: PathBuf },

    /// View constructed with an empty lookup-path list.
    #[error("At least one lookup path is required")]
    NoLookupPaths,

    /// TTL expression could not be parsed.
    #[error("Invalid TTL expression: '{value}'")]
    InvalidTtl { value: String },

    /// Settings file not found at expected location.
    #[error("Settings not found: {path}")]
    SettingsNotFound { path: PathBuf },

    /// Failed to parse settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Veranda operations.
pub type Result<T> = std::result::Result<T, VerandaError>;
