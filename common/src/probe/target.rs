//! # Probe Target Model
//!
//! Defines the input to a probe run: an ordered sequence of host
//! identifiers.
//!
//! The list is deliberately dumb. Order is preserved, duplicates are kept
//! (one check per listed entry), and no resolution happens at parse time.
//! The only identity rule lives here too: whether a candidate names the
//! local host, which the prober strips before issuing any checks.

use std::str::FromStr;

/// An ordered, possibly duplicated sequence of host identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetList {
    hosts: Vec<String>,
}

impl TargetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }
}

impl IntoIterator for TargetList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.into_iter()
    }
}

impl FromStr for TargetList {
    type Err = String;

    /// Parses a comma-separated list of hostnames.
    ///
    /// Entries are trimmed; empty segments (e.g. a trailing comma) are
    /// skipped. Duplicate names are preserved.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut hosts: Vec<String> = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if part.contains(char::is_whitespace) {
                return Err(format!("invalid host name: {part}"));
            }
            hosts.push(part.to_string());
        }

        if hosts.is_empty() {
            return Err(format!("no targets in: {s}"));
        }

        Ok(Self { hosts })
    }
}

/// The identifier of the machine running the probe.
pub fn local_host_name() -> anyhow::Result<String> {
    sys_info::hostname().map_err(|e| anyhow::anyhow!("cannot determine local host name: {e}"))
}

/// Hostname comparison is case-insensitive. An unknown local name
/// (empty string) matches nothing.
pub fn is_local_host(candidate: &str, local: &str) -> bool {
    !local.is_empty() && candidate.eq_ignore_ascii_case(local)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
