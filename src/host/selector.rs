//! Host environment selection.
//!
//! Matches the running machine against registered hosts in registration
//! order (first match wins), falls back to the designated fallback host,
//! then runs the selected host's bootstrap. Lifecycle events fire after
//! each state change.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::EnvironmentSettings;
use crate::error::{Result, VerandaError};
use crate::events::{EnvEvent, EventBus};
use crate::host::{Host, Machine};

/// A registry of environment hosts with machine-based selection.
#[derive(Debug)]
pub struct Environment {
    settings: EnvironmentSettings,
    hosts: Vec<Host>,
    fallback: Option<usize>,
    current: Option<usize>,
    events: EventBus,
    overrides: BTreeMap<String, serde_json::Value>,
}

impl Environment {
    /// Create a selector with the given settings.
    pub fn new(settings: EnvironmentSettings) -> Self {
        Self {
            settings,
            hosts: Vec::new(),
            fallback: None,
            current: None,
            events: EventBus::new(),
            overrides: BTreeMap::new(),
        }
    }

    /// Access the event bus to register lifecycle subscribers.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Register a host under a key. Re-adding a key replaces the existing
    /// registration in place, keeping its position in matching order.
    ///
    /// When a bootstrap directory is configured and the host carries neither
    /// a callback nor an explicit file, `<dir>/<key>.json` is attached as its
    /// bootstrap file. The first registered host becomes the fallback.
    pub fn add_host(&mut self, key: impl Into<String>, mut host: Host) -> &Host {
        let key = key.into();
        host.key = key.clone();

        if let Some(dir) = &self.settings.bootstrap_dir {
            if host.bootstrap_file.is_none() && host.callback.is_none() {
                host.bootstrap_file = Some(dir.join(format!("{key}.json")));
            }
        }

        let index = match self.hosts.iter().position(|existing| existing.key == key) {
            Some(index) => {
                self.hosts[index] = host;
                index
            }
            None => {
                self.hosts.push(host);
                self.hosts.len() - 1
            }
        };

        if self.fallback.is_none() {
            self.fallback = Some(index);
        }

        &self.hosts[index]
    }

    /// Look up a host by key.
    pub fn get_host(&self, key: &str) -> Result<&Host> {
        self.hosts
            .iter()
            .find(|host| host.key == key)
            .ok_or_else(|| VerandaError::MissingHost {
                key: key.to_string(),
            })
    }

    /// All registered hosts, in registration order.
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    /// Designate the fallback host; the key must already be registered.
    pub fn set_fallback(&mut self, key: &str) -> Result<()> {
        let index = self
            .hosts
            .iter()
            .position(|host| host.key == key)
            .ok_or_else(|| VerandaError::MissingHost {
                key: key.to_string(),
            })?;

        self.fallback = Some(index);
        Ok(())
    }

    /// The designated fallback host, if any.
    pub fn fallback(&self) -> Option<&Host> {
        self.fallback.map(|index| &self.hosts[index])
    }

    /// The currently selected host, set by [`Environment::initialize`].
    pub fn current(&self) -> Option<&Host> {
        self.current.map(|index| &self.hosts[index])
    }

    /// Bootstrap overrides loaded from the selected host's bootstrap file.
    pub fn overrides(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.overrides
    }

    /// Select a host for the machine and run its bootstrap.
    ///
    /// Hosts are checked in registration order; the first whose patterns
    /// match the machine hostname wins. When nothing matches, the fallback
    /// host is selected and `FallbackSelected` is emitted. `Initialized`
    /// fires once a host is selected, then the bootstrap runs (emitting
    /// `BootstrapLoaded` on success).
    pub fn initialize(&mut self, machine: &Machine) -> Result<()> {
        if self.hosts.is_empty() {
            return Ok(());
        }

        let matched = self.hosts.iter().position(|host| host.matches(machine));

        let selected = match matched {
            Some(index) => {
                debug!(
                    host = %self.hosts[index].key,
                    hostname = %machine.hostname,
                    "host matched machine"
                );
                index
            }
            None => match self.fallback {
                Some(index) => {
                    debug!(
                        host = %self.hosts[index].key,
                        hostname = %machine.hostname,
                        "no host matched, selecting fallback"
                    );
                    index
                }
                None => return Ok(()),
            },
        };

        self.current = Some(selected);

        if matched.is_none() {
            self.events.emit(&EnvEvent::FallbackSelected {
                host: self.hosts[selected].key.clone(),
            });
        }

        self.events.emit(&EnvEvent::Initialized {
            host: self.hosts[selected].key.clone(),
        });

        self.run_bootstrap(selected)
    }

    /// Run the selected host's bootstrap: its callback if registered,
    /// otherwise its bootstrap file parsed into the overrides map.
    fn run_bootstrap(&mut self, index: usize) -> Result<()> {
        let key = self.hosts[index].key.clone();

        if let Some(callback) = &self.hosts[index].callback {
            callback(&self.hosts[index])?;
            self.events.emit(&EnvEvent::BootstrapLoaded { host: key });
            return Ok(());
        }

        let Some(path) = self.hosts[index].bootstrap_file.clone() else {
            return Ok(());
        };

        if !path.exists() {
            if self.settings.strict_bootstrap {
                return Err(VerandaError::MissingBootstrap { key, path });
            }
            debug!(host = %key, path = %path.display(), "bootstrap file absent, skipping");
            return Ok(());
        }

        let map = load_bootstrap(&path)?;
        self.overrides.extend(map);

        self.events.emit(&EnvEvent::BootstrapLoaded { host: key });
        Ok(())
    }

    /// Does the current host match the passed key?
    pub fn is(&self, key: &str) -> bool {
        self.current().is_some_and(|host| host.key == key)
    }

    pub fn is_development(&self) -> bool {
        self.current().is_some_and(Host::is_development)
    }

    pub fn is_staging(&self) -> bool {
        self.current().is_some_and(Host::is_staging)
    }

    pub fn is_production(&self) -> bool {
        self.current().is_some_and(Host::is_production)
    }

    pub fn is_qa(&self) -> bool {
        self.current().is_some_and(Host::is_qa)
    }
}

/// Parse a bootstrap file into a key/value overrides map.
fn load_bootstrap(path: &Path) -> Result<BTreeMap<String, serde_json::Value>> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| VerandaError::SettingsParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
