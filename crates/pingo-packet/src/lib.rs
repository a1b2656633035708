//! `ICMPv4` echo packet wire format parsing and building.
//!
//! # Endianness
//!
//! The internal representation is held in network byte order (big-endian) and
//! all accessor methods take and return data in host byte order, converting as
//! necessary for the given architecture.
//!
//! # Example
//!
//! The following example builds an `ICMPv4` echo request packet:
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! use pingo_packet::checksum::icmp_ipv4_checksum;
//! use pingo_packet::icmpv4::echo::EchoPacket;
//! use pingo_packet::icmpv4::{IcmpCode, IcmpType};
//!
//! let mut buf = [0; EchoPacket::minimum_packet_size()];
//! let mut icmp = EchoPacket::new(&mut buf)?;
//! icmp.set_icmp_type(IcmpType::EchoRequest);
//! icmp.set_icmp_code(IcmpCode(0));
//! icmp.set_identifier(1234);
//! icmp.set_sequence(10);
//! icmp.set_checksum(icmp_ipv4_checksum(icmp.packet()));
//! assert_eq!(icmp.packet(), &hex_literal::hex!("08 00 f3 23 04 d2 00 0a"));
//! # Ok(())
//! # }
//! ```
//!
//! The following example parses an `ICMPv4` echo reply packet:
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! use pingo_packet::icmpv4::echo::EchoPacket;
//! use pingo_packet::icmpv4::IcmpType;
//!
//! let buf = hex_literal::hex!("00 00 fb 23 04 d2 00 0a");
//! let icmp = EchoPacket::new_view(&buf)?;
//! assert_eq!(IcmpType::EchoReply, icmp.get_icmp_type());
//! assert_eq!(1234, icmp.get_identifier());
//! assert_eq!(10, icmp.get_sequence());
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod buffer;

/// Packet errors.
pub mod error;

/// Functions for calculating network checksums.
pub mod checksum;

/// `ICMPv4` packets.
pub mod icmpv4;

/// The size of an `IPv4` header without options.
///
/// Some platforms deliver the `IPv4` header along with the `ICMP` message when
/// reading from a datagram `ICMP` socket.
pub const IPV4_HEADER_LEN: usize = 20;

/// Format a payload as a hexadecimal string.
#[must_use]
pub fn fmt_payload(bytes: &[u8]) -> String {
    use itertools::Itertools as _;
    format!("{:02x}", bytes.iter().format(" "))
}
