//! Encoding of echo requests and decoding of inbound `ICMP` messages.

use crate::error::Result;
use crate::{Sequence, TraceId};
use pingo_packet::checksum::icmp_ipv4_checksum;
use pingo_packet::icmpv4::echo::EchoPacket;
use pingo_packet::icmpv4::{IcmpCode, IcmpType};
use pingo_packet::IPV4_HEADER_LEN;

/// The header fields of a decoded inbound `ICMP` message.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EchoHeader {
    pub icmp_type: IcmpType,
    pub icmp_code: IcmpCode,
    pub identifier: TraceId,
    pub sequence: Sequence,
}

impl EchoHeader {
    /// Is this the echo reply to the request with `identifier` and `sequence`?
    #[must_use]
    pub fn is_reply_to(&self, identifier: TraceId, sequence: Sequence) -> bool {
        self.icmp_type == IcmpType::EchoReply
            && self.identifier == identifier
            && self.sequence == sequence
    }
}

/// Build an `ICMPv4` echo request.
pub fn encode(identifier: TraceId, sequence: Sequence, payload: &[u8]) -> Result<Vec<u8>> {
    let mut buf = vec![0_u8; EchoPacket::minimum_packet_size() + payload.len()];
    let mut echo = EchoPacket::new(&mut buf)?;
    echo.set_icmp_type(IcmpType::EchoRequest);
    echo.set_icmp_code(IcmpCode(0));
    echo.set_identifier(identifier.0);
    echo.set_sequence(sequence.0);
    echo.set_payload(payload);
    echo.set_checksum(icmp_ipv4_checksum(echo.packet()));
    Ok(buf)
}

/// Decode the header of an inbound `ICMPv4` message.
///
/// The `buf` must start at the `ICMP` header, see [`icmp_offset`].
pub fn decode(buf: &[u8]) -> pingo_packet::error::Result<EchoHeader> {
    let echo = EchoPacket::new_view(buf)?;
    Ok(EchoHeader {
        icmp_type: echo.get_icmp_type(),
        icmp_code: echo.get_icmp_code(),
        identifier: TraceId(echo.get_identifier()),
        sequence: Sequence(echo.get_sequence()),
    })
}

/// The offset of the `ICMP` message within a received datagram.
///
/// Some platforms prepend the `IPv4` header to datagrams read from an `ICMP`
/// socket; this is detected by the received length being exactly one header
/// longer than the request that was sent.
#[must_use]
pub const fn icmp_offset(received_len: usize, sent_len: usize) -> usize {
    if received_len == sent_len + IPV4_HEADER_LEN {
        IPV4_HEADER_LEN
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingo_packet::error::Error;
    use test_case::test_case;

    #[test]
    fn test_encode() {
        let packet = encode(TraceId(1234), Sequence(10), &[]).unwrap();
        assert_eq!(hex_literal::hex!("08 00 f3 23 04 d2 00 0a"), packet.as_slice());
    }

    #[test]
    fn test_encode_with_payload() {
        let packet = encode(TraceId(1), Sequence(1), b"HI").unwrap();
        assert_eq!(10, packet.len());
        assert_eq!(&[0x08, 0x00], &packet[0..2]);
        assert_eq!(b"HI", &packet[8..]);
        assert_eq!(icmp_ipv4_checksum(&packet), u16::from_be_bytes([packet[2], packet[3]]));
    }

    #[test]
    fn test_decode_echo_reply() {
        let buf = hex_literal::hex!("00 00 fb 23 04 d2 00 0a 48 49");
        let header = decode(&buf).unwrap();
        assert_eq!(IcmpType::EchoReply, header.icmp_type);
        assert_eq!(IcmpCode(0), header.icmp_code);
        assert_eq!(TraceId(1234), header.identifier);
        assert_eq!(Sequence(10), header.sequence);
    }

    #[test]
    fn test_decode_truncated() {
        let buf = hex_literal::hex!("00 00 fb 23 04");
        let err = decode(&buf).unwrap_err();
        assert_eq!(
            Error::InsufficientPacketBuffer {
                packet: "EchoPacket",
                minimum: 8,
                provided: 5,
            },
            err
        );
    }

    #[test_case(IcmpType::EchoReply, 1234, 10 => true; "matching reply")]
    #[test_case(IcmpType::EchoReply, 4321, 10 => false; "other identifier")]
    #[test_case(IcmpType::EchoReply, 1234, 9 => false; "stale sequence")]
    #[test_case(IcmpType::EchoRequest, 1234, 10 => false; "echo request")]
    #[test_case(IcmpType::DestinationUnreachable, 1234, 10 => false; "unreachable")]
    fn test_is_reply_to(icmp_type: IcmpType, identifier: u16, sequence: u16) -> bool {
        let header = EchoHeader {
            icmp_type,
            icmp_code: IcmpCode(0),
            identifier: TraceId(identifier),
            sequence: Sequence(sequence),
        };
        header.is_reply_to(TraceId(1234), Sequence(10))
    }

    #[test_case(23, 23 => 0; "no header")]
    #[test_case(43, 23 => 20; "ipv4 header prepended")]
    #[test_case(44, 23 => 0; "unexpected length")]
    #[test_case(8, 23 => 0; "short reply")]
    fn test_icmp_offset(received: usize, sent: usize) -> usize {
        icmp_offset(received, sent)
    }

    #[test]
    fn test_decode_after_header_skip() {
        let request = encode(TraceId(7), Sequence(3), b"PING").unwrap();
        let mut datagram = vec![0x45_u8; IPV4_HEADER_LEN];
        datagram.extend_from_slice(&request);
        datagram[IPV4_HEADER_LEN] = IcmpType::EchoReply.id();
        let offset = icmp_offset(datagram.len(), request.len());
        let header = decode(&datagram[offset..]).unwrap();
        assert!(header.is_reply_to(TraceId(7), Sequence(3)));
    }
}
