//! The Internet checksum (RFC 1071) as used by `ICMPv4`.

/// The index of the 16-bit word holding the checksum in an `ICMP` header.
const ICMP_CHECKSUM_WORD: usize = 1;

/// Calculate the checksum for an `IPv4` `ICMP` packet.
///
/// The checksum field itself is skipped, so the result is the same whether or
/// not the checksum has already been set.
#[must_use]
pub fn icmp_ipv4_checksum(data: &[u8]) -> u16 {
    if data.is_empty() {
        return 0;
    }
    finalize_checksum(sum_be_words(data, ICMP_CHECKSUM_WORD))
}

/// Sum all big-endian 16-bit words of `data`, skipping the word at `skip_word`.
///
/// An odd trailing byte is padded with zero.
fn sum_be_words(data: &[u8], skip_word: usize) -> u32 {
    data.chunks(2)
        .enumerate()
        .filter(|(i, _)| *i != skip_word)
        .map(|(_, word)| match word {
            [hi, lo] => u32::from(u16::from_be_bytes([*hi, *lo])),
            [hi] => u32::from(*hi) << 8,
            _ => 0,
        })
        .sum()
}

const fn finalize_checksum(mut sum: u32) -> u16 {
    while sum >> 16 != 0 {
        sum = (sum >> 16) + (sum & 0xFFFF);
    }
    !sum as u16
}
