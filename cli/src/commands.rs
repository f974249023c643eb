pub mod info;
pub mod probe;

use clap::{Parser, Subcommand};
use reachr_common::probe::target::TargetList;
use reachr_core::prober;

#[derive(Parser)]
#[command(name = "reachr")]
#[command(about = "A concurrent host reachability prober.")]
pub struct CommandLine {
    /// Reduce decorative output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show prober capabilities on this device
    #[command(alias = "i")]
    Info,
    /// Probe one or more hosts for reachability
    #[command(alias = "p")]
    Probe {
        /// Comma-separated hostnames; falls back to the host directory when omitted
        targets: Option<TargetList>,
        /// Maximum checks in flight at once
        #[arg(short, long, default_value_t = prober::DEFAULT_CONCURRENCY_LIMIT)]
        limit: usize,
        /// Per-check deadline in milliseconds
        #[arg(short, long, default_value_t = 120)]
        timeout_ms: u64,
        /// Force the unprivileged TCP handshake check
        #[arg(long)]
        tcp: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
