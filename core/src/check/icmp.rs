//! Privileged reachability check using raw ICMP echo.
//!
//! Requires root: the transport channel opens a raw socket. Each check
//! opens and drops its **own** channel, so nothing is shared between
//! in-flight checks and releasing one cannot affect another.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use pnet::packet::icmp::IcmpPacket;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::transport::{self, TransportChannelType, TransportProtocol, icmp_packet_iter};

use reachr_common::error::ProbeError;
use reachr_protocols::icmp as echo;

use super::CheckProbe;

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const CHANNEL_TYPE_ICMP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));

pub struct IcmpEchoProbe {
    /// How long one check waits for its reply. Mirrors the caller's
    /// per-check deadline: the blocking channel read cannot be interrupted
    /// from the async side, so the deadline is enforced here as well.
    reply_window: Duration,
}

impl IcmpEchoProbe {
    pub fn new(reply_window: Duration) -> Self {
        Self { reply_window }
    }
}

#[async_trait]
impl CheckProbe for IcmpEchoProbe {
    fn ensure_supported(&self) -> Result<(), ProbeError> {
        if !is_root::is_root() {
            return Err(ProbeError::PlatformUnsupported {
                reason: "raw ICMP sockets require root privileges".to_string(),
            });
        }
        Ok(())
    }

    async fn probe(&self, target: &str) -> anyhow::Result<bool> {
        let addr: IpAddr = resolve_v4(target).await?;
        let window: Duration = self.reply_window;
        tokio::task::spawn_blocking(move || echo_transaction(addr, window)).await?
    }
}

async fn resolve_v4(target: &str) -> anyhow::Result<IpAddr> {
    let addrs = tokio::net::lookup_host((target, 0u16))
        .await
        .with_context(|| format!("resolving {target}"))?;
    addrs
        .map(|sock_addr| sock_addr.ip())
        .find(IpAddr::is_ipv4)
        .with_context(|| format!("{target} has no IPv4 address"))
}

/// Sends one echo request and reads replies until the matching one shows
/// up or the window closes. The channel (and its raw socket) is dropped on
/// every exit path.
fn echo_transaction(addr: IpAddr, window: Duration) -> anyhow::Result<bool> {
    let (mut tx, mut rx) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_ICMP)
        .context("opening ICMP transport channel")?;

    let token: echo::EchoToken = echo::new_token();
    let request: Vec<u8> = echo::create_echo_request(&token)?;
    let request_packet = IcmpPacket::new(&request).context("framing echo request")?;
    tx.send_to(request_packet, addr)?;

    let mut replies = icmp_packet_iter(&mut rx);
    let deadline: Instant = Instant::now() + window;

    loop {
        let remaining: Duration = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(false);
        }

        match replies.next_with_timeout(remaining)? {
            Some((packet, source)) => {
                if source == addr && echo::is_matching_reply(&packet, &token) {
                    return Ok(true);
                }
                // Reply for some other check or an unrelated ICMP message.
            }
            None => return Ok(false),
        }
    }
}
