//! Unprivileged reachability check over a TCP handshake.

use async_trait::async_trait;
use reachr_common::error::ProbeError;
use tokio::net::{TcpStream, lookup_host};

use super::CheckProbe;

const PROBE_PORT: u16 = 443;

/// Connects to a well-known port on the target.
///
/// A completed handshake and an active refusal both prove a live stack;
/// silence (the caller's deadline) or a failed name resolution do not.
pub struct TcpConnectProbe;

impl TcpConnectProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TcpConnectProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckProbe for TcpConnectProbe {
    fn ensure_supported(&self) -> Result<(), ProbeError> {
        Ok(())
    }

    async fn probe(&self, target: &str) -> anyhow::Result<bool> {
        let mut addrs = lookup_host((target, PROBE_PORT)).await?;
        let Some(addr) = addrs.next() else {
            return Ok(false);
        };

        match TcpStream::connect(addr).await {
            Ok(_stream) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::ConnectionRefused => Ok(true),
            Err(_) => Ok(false),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
