//! Runtime machine description and hostname matching.
//!
//! The selector is a pure function of its inputs: callers pass an explicit
//! [`Machine`] value rather than the selector reaching for process globals.

use regex::Regex;

/// Description of the machine a request is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// The machine hostname matched against host patterns.
    pub hostname: String,
    /// Remote address of the current request, if any.
    pub remote_addr: Option<String>,
    /// Host header of the current request, if any.
    pub host_header: Option<String>,
}

impl Machine {
    /// Create a machine description with only a hostname.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            remote_addr: None,
            host_header: None,
        }
    }

    /// Set the request's remote address.
    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    /// Set the request's host header.
    pub fn with_host_header(mut self, header: impl Into<String>) -> Self {
        self.host_header = Some(header.into());
        self
    }

    /// Build a machine description from the `HOSTNAME` environment variable,
    /// falling back to `"localhost"`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string()))
    }

    /// Whether the current request originates from the local machine.
    ///
    /// True when the remote address is a loopback address or the host header
    /// names `localhost`.
    pub fn is_localhost(&self) -> bool {
        if let Some(addr) = &self.remote_addr {
            if addr == "127.0.0.1" || addr == "::1" {
                return true;
            }
        }

        if let Some(header) = &self.host_header {
            let name = header.split(':').next().unwrap_or(header);
            if name.eq_ignore_ascii_case("localhost") {
                return true;
            }
        }

        false
    }
}

/// Case-insensitive whole-hostname match supporting a trailing `*` wildcard.
///
/// `web*` matches `web-01` and `WEB`, but a plain `web` matches only `web`
/// itself.
pub fn matches_hostname(pattern: &str, hostname: &str) -> bool {
    let escaped = regex::escape(pattern).replace(r"\*", ".*");

    match Regex::new(&format!("(?i)^{escaped}$")) {
        Ok(re) => re.is_match(hostname),
        Err(_) => false,
    }
}
