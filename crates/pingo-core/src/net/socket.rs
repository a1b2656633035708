use crate::error::IoResult as Result;
use std::net::SocketAddr;
use std::time::Instant;

/// The result of a blocking receive.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Recv {
    /// A datagram of the given length was read from the given peer.
    Data(usize, Option<SocketAddr>),
    /// The read deadline expired before a datagram arrived.
    Timeout,
}

/// An unprivileged `ICMP` datagram socket.
#[cfg_attr(test, mockall::automock)]
pub trait Socket
where
    Self: Sized,
{
    /// Create an IPv4 `ICMP` datagram socket bound to the wildcard address.
    fn new_icmp_dgram_socket_ipv4() -> Result<Self>;
    /// Bound all subsequent receives by `deadline`.
    fn set_read_deadline(&mut self, deadline: Instant) -> Result<()>;
    /// Returns the number of bytes written.
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> Result<usize>;
    /// Block until a datagram arrives or the read deadline expires.
    fn recv_from(&mut self, buf: &mut [u8]) -> Result<Recv>;
    /// The `ICMP` identifier assigned to this socket by the platform, if any.
    ///
    /// Some platforms (i.e. Linux) overwrite the identifier of outbound echo
    /// requests sent on a datagram socket with a per-socket value.
    fn local_identifier(&mut self) -> Result<Option<u16>>;
}
