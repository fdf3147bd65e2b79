//! Host environment registry, matching, and selection.
//!
//! A [`Host`] is a named environment configuration (dev/staging/prod/qa)
//! carrying the hostname patterns it matches and an optional bootstrap.
//! The [`Environment`] selector registers hosts, matches them against a
//! [`Machine`] description, and runs the selected host's bootstrap.

pub mod machine;
pub mod selector;

pub use machine::{matches_hostname, Machine};
pub use selector::Environment;

use std::fmt;
use std::path::PathBuf;

use crate::error::Result;

/// Bootstrap callback invoked for the selected host at initialization.
pub type BootstrapFn = Box<dyn Fn(&Host) -> Result<()> + Send + Sync>;

/// Classification of an environment host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostLevel {
    Dev,
    Staging,
    Prod,
    Qa,
}

impl fmt::Display for HostLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Staging => write!(f, "staging"),
            Self::Prod => write!(f, "prod"),
            Self::Qa => write!(f, "qa"),
        }
    }
}

/// A named environment host configuration.
pub struct Host {
    /// Registry key, assigned by [`Environment::add_host`].
    pub(crate) key: String,
    level: HostLevel,
    patterns: Vec<String>,
    pub(crate) bootstrap_file: Option<PathBuf>,
    pub(crate) callback: Option<BootstrapFn>,
}

impl Host {
    /// Create a host of the given level with no patterns.
    pub fn new(level: HostLevel) -> Self {
        Self {
            key: String::new(),
            level,
            patterns: Vec::new(),
            bootstrap_file: None,
            callback: None,
        }
    }

    /// Add a hostname pattern (supports a trailing `*` wildcard).
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Add several hostname patterns at once.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Set an explicit bootstrap file, overriding the selector's
    /// bootstrap-directory convention.
    pub fn with_bootstrap_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.bootstrap_file = Some(path.into());
        self
    }

    /// Register a bootstrap callback. Takes precedence over any bootstrap
    /// file when the host is selected.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Host) -> Result<()> + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// The registry key this host was added under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The host's environment level.
    pub fn level(&self) -> HostLevel {
        self.level
    }

    /// The hostname patterns this host matches.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// The bootstrap file attached to this host, if any.
    pub fn bootstrap_file(&self) -> Option<&PathBuf> {
        self.bootstrap_file.as_ref()
    }

    /// Whether any of this host's patterns match the machine's hostname.
    pub fn matches(&self, machine: &Machine) -> bool {
        self.patterns
            .iter()
            .any(|pattern| matches_hostname(pattern, &machine.hostname))
    }

    pub fn is_development(&self) -> bool {
        self.level == HostLevel::Dev
    }

    pub fn is_staging(&self) -> bool {
        self.level == HostLevel::Staging
    }

    pub fn is_production(&self) -> bool {
        self.level == HostLevel::Prod
    }

    pub fn is_qa(&self) -> bool {
        self.level == HostLevel::Qa
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("key", &self.key)
            .field("level", &self.level)
            .field("patterns", &self.patterns)
            .field("bootstrap_file", &self.bootstrap_file)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_builder_collects_patterns() {
        let host = Host::new(HostLevel::Prod)
            .with_pattern("web*")
            .with_patterns(["app*", "api*"]);

        assert_eq!(host.patterns(), ["web*", "app*", "api*"]);
        assert_eq!(host.level(), HostLevel::Prod);
    }

    #[test]
    fn host_matches_machine_by_any_pattern() {
        let host = Host::new(HostLevel::Prod).with_patterns(["web*", "api*"]);

        assert!(host.matches(&Machine::new("api-03")));
        assert!(host.matches(&Machine::new("web-01")));
        assert!(!host.matches(&Machine::new("db-01")));
    }

    #[test]
    fn host_with_no_patterns_matches_nothing() {
        let host = Host::new(HostLevel::Dev);
        assert!(!host.matches(&Machine::new("anything")));
    }

    #[test]
    fn level_predicates() {
        assert!(Host::new(HostLevel::Dev).is_development());
        assert!(Host::new(HostLevel::Staging).is_staging());
        assert!(Host::new(HostLevel::Prod).is_production());
        assert!(Host::new(HostLevel::Qa).is_qa());
        assert!(!Host::new(HostLevel::Qa).is_production());
    }

    #[test]
    fn level_display() {
        assert_eq!(HostLevel::Dev.to_string(), "dev");
        assert_eq!(HostLevel::Prod.to_string(), "prod");
    }

    #[test]
    fn debug_omits_callback_body() {
        let host = Host::new(HostLevel::Dev).with_callback(|_| Ok(()));
        let repr = format!("{host:?}");
        assert!(repr.contains("callback: true"));
    }
}
