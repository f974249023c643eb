//! ICMPv4 echo request construction and reply correlation.
//!
//! The transport layer hands back every ICMP packet on the wire, so each
//! outgoing request carries a random identifier that the reply must echo
//! for the check to count.

use anyhow::Context;
use pnet::packet::Packet;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::{IcmpCodes, MutableEchoRequestPacket};
use pnet::packet::icmp::{IcmpPacket, IcmpTypes, checksum};

const ICMP_HDR_LEN: usize = 8;
const ECHO_PAYLOAD_LEN: usize = 8;

/// Correlates one echo request with its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoToken {
    pub identifier: u16,
    pub sequence: u16,
}

pub fn new_token() -> EchoToken {
    EchoToken {
        identifier: rand::random(),
        sequence: 0,
    }
}

pub fn create_echo_request(token: &EchoToken) -> anyhow::Result<Vec<u8>> {
    let total_len: usize = ICMP_HDR_LEN + ECHO_PAYLOAD_LEN;
    let mut buffer: Vec<u8> = vec![0u8; total_len];
    {
        let mut echo: MutableEchoRequestPacket =
            MutableEchoRequestPacket::new(&mut buffer).context("creating echo request packet")?;
        echo.set_icmp_type(IcmpTypes::EchoRequest);
        echo.set_icmp_code(IcmpCodes::NoCode);
        echo.set_identifier(token.identifier);
        echo.set_sequence_number(token.sequence);

        echo.set_checksum(0);
        let icmp_view =
            IcmpPacket::new(echo.packet()).context("framing echo request for checksum")?;
        let csm = checksum(&icmp_view);
        echo.set_checksum(csm);
    }
    Ok(buffer)
}

/// True only for an echo reply whose identifier and sequence match `token`.
pub fn is_matching_reply(packet: &IcmpPacket, token: &EchoToken) -> bool {
    if packet.get_icmp_type() != IcmpTypes::EchoReply {
        return false;
    }
    EchoReplyPacket::new(packet.packet())
        .map(|reply| {
            reply.get_identifier() == token.identifier
                && reply.get_sequence_number() == token.sequence
        })
        .unwrap_or(false)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
