//! The central **abstraction** for a single reachability check.
//!
//! The prober never talks to a socket directly. It issues checks through
//! the [`CheckProbe`] trait and treats everything behind it as opaque:
//! one target in, one verdict out. That keeps the fan-out engine testable
//! against a scripted fake and lets the privileged and unprivileged
//! implementations swap freely.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reachr_common::error::ProbeError;

pub mod icmp;
pub mod tcp;

/// One non-blocking reachability check primitive.
#[async_trait]
pub trait CheckProbe: Send + Sync {
    /// Verifies the platform can issue this kind of check at all.
    ///
    /// Called once per probe run, before any check goes out. A failure
    /// here is fatal to the run; a failure later is just an unreachable
    /// host.
    fn ensure_supported(&self) -> Result<(), ProbeError>;

    /// Issues one check against `target` and reports whether it answered.
    ///
    /// Implementations own whatever resource the check needs (socket,
    /// channel) for exactly the duration of this call; the caller bounds
    /// the call with the per-check deadline and may drop it at any point.
    async fn probe(&self, target: &str) -> anyhow::Result<bool>;
}

/// Picks the strongest check the current process can issue: raw ICMP echo
/// when running privileged, the TCP handshake probe otherwise.
pub fn default_probe(check_timeout: Duration) -> Arc<dyn CheckProbe> {
    if is_root::is_root() {
        Arc::new(icmp::IcmpEchoProbe::new(check_timeout))
    } else {
        Arc::new(tcp::TcpConnectProbe::new())
    }
}
