//! Host directory backed by the system hosts file.
//!
//! The simplest name-bearing directory every machine already has. Each
//! non-comment line contributes its hostname columns (the address column
//! is skipped), minus the loopback aliases nobody wants probed.

use std::fs;
use std::path::PathBuf;

use reachr_core::directory::{self, HostDirectory, NameRecord};

#[cfg(not(target_os = "windows"))]
const SYSTEM_HOSTS_PATH: &str = "/etc/hosts";
#[cfg(target_os = "windows")]
const SYSTEM_HOSTS_PATH: &str = r"C:\Windows\System32\drivers\etc\hosts";

const SKIPPED_NAMES: &[&str] = &["localhost", "ip6-localhost", "ip6-loopback"];

pub struct HostsFileDirectory {
    path: PathBuf,
}

impl HostsFileDirectory {
    pub fn system() -> Self {
        Self {
            path: PathBuf::from(SYSTEM_HOSTS_PATH),
        }
    }
}

impl HostDirectory for HostsFileDirectory {
    fn lookup(&self, filter: &str) -> anyhow::Result<Vec<NameRecord>> {
        let content: String = fs::read_to_string(&self.path)?;
        Ok(parse_hosts(&content, filter))
    }
}

fn parse_hosts(content: &str, filter: &str) -> Vec<NameRecord> {
    let mut records: Vec<NameRecord> = Vec::new();

    for line in content.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        // First column is the address, the rest are names for it.
        for name in line.split_whitespace().skip(1) {
            if SKIPPED_NAMES.contains(&name) {
                continue;
            }
            if directory::matches_filter(name, filter) {
                records.push(NameRecord::new(name));
            }
        }
    }

    records
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
