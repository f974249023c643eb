//! Directory lookup collaborator.
//!
//! Supplies the default target list when the caller does not pass one.
//! The prober only needs "a sequence of name-bearing records" behind a
//! filter; where those records come from (a hosts file, a directory
//! service, a static list) is the implementor's business.

/// A single name-bearing record returned by a directory lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameRecord {
    pub name: String,
}

impl NameRecord {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

pub trait HostDirectory {
    /// Returns the records whose names match `filter` (`*` selects all,
    /// a trailing `*` matches by prefix, anything else matches exactly).
    fn lookup(&self, filter: &str) -> anyhow::Result<Vec<NameRecord>>;
}

/// Extracts just the target identifiers from directory records.
pub fn names(records: Vec<NameRecord>) -> Vec<String> {
    records.into_iter().map(|record| record.name).collect()
}

/// Shared filter semantics for [`HostDirectory`] implementations.
pub fn matches_filter(name: &str, filter: &str) -> bool {
    if filter == "*" {
        return true;
    }
    if let Some(prefix) = filter.strip_suffix('*') {
        return name.to_ascii_lowercase().starts_with(&prefix.to_ascii_lowercase());
    }
    name.eq_ignore_ascii_case(filter)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
