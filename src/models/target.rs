//! Query targets and input sanitising

use crate::utils::InputError;
use serde::Serialize;
use std::fmt;

/// A sanitised `host:port` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

impl Target {
    /// Sanitise raw host and port input.
    ///
    /// Host labels that are not `[a-z0-9-]+` after lower-casing are dropped and
    /// the rest rejoined; the port keeps only its leading digits. An empty host
    /// or a zero port is rejected.
    pub fn sanitise(raw_host: Option<&str>, raw_port: Option<&str>) -> Result<Self, InputError> {
        let host = raw_host.map(sanitise_host).unwrap_or_default();
        let port = raw_port.map(sanitise_port).unwrap_or(0);

        if host.is_empty() || port == 0 {
            return Err(InputError::InvalidTarget { host, port });
        }

        Ok(Self { host, port })
    }

    /// Parse a `host:port` specification, splitting on the first `:`
    pub fn parse_spec(spec: &str) -> Result<Self, InputError> {
        match spec.split_once(':') {
            Some((host, port)) => Self::sanitise(Some(host), Some(port)),
            None => Self::sanitise(Some(spec), None),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Lower-case the host and keep only well-formed DNS labels
pub fn sanitise_host(raw: &str) -> String {
    raw.to_lowercase()
        .split('.')
        .filter(|label| is_valid_label(label))
        .collect::<Vec<_>>()
        .join(".")
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Parse the leading integer of `raw`; anything unusable becomes `0`
pub fn sanitise_port(raw: &str) -> u16 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<u16>().unwrap_or(0)
}
