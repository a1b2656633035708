use crate::error::{IoError, IoOperation, IoResult};
use crate::net::socket::{Recv, Socket};
use itertools::Itertools;
use socket2::{Domain, Protocol, SockAddr, Type};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};
use tracing::instrument;

/// The smallest read timeout passed to the OS.
///
/// A zero read timeout means "block forever" to the OS and so any remaining
/// duration is rounded up to at least this value.
const MIN_READ_TIMEOUT: Duration = Duration::from_millis(1);

/// A network socket.
pub struct SocketImpl {
    inner: socket2::Socket,
    deadline: Option<Instant>,
}

impl SocketImpl {
    /// The read timeout remaining until the deadline, `None` if it has passed.
    fn remaining(&self) -> Option<Option<Duration>> {
        match self.deadline {
            None => Some(None),
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    None
                } else {
                    Some(Some(remaining.max(MIN_READ_TIMEOUT)))
                }
            }
        }
    }
}

impl Socket for SocketImpl {
    #[instrument(level = "trace")]
    fn new_icmp_dgram_socket_ipv4() -> IoResult<Self> {
        let inner = socket2::Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::ICMPV4))
            .map_err(|err| IoError::Other(err, IoOperation::NewSocket))?;
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
        inner
            .bind(&SockAddr::from(addr))
            .map_err(|err| IoError::Bind(err, addr))?;
        Ok(Self {
            inner,
            deadline: None,
        })
    }
    #[instrument(skip(self), level = "trace")]
    fn set_read_deadline(&mut self, deadline: Instant) -> IoResult<()> {
        self.deadline = Some(deadline);
        Ok(())
    }
    #[instrument(skip(self, buf), level = "trace")]
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> IoResult<usize> {
        tracing::trace!(buf = format!("{:02x?}", buf.iter().format(" ")), ?addr);
        self.inner
            .send_to(buf, &SockAddr::from(addr))
            .map_err(|err| IoError::SendTo(err, addr))
    }
    #[instrument(skip(self, buf), level = "trace")]
    fn recv_from(&mut self, buf: &mut [u8]) -> IoResult<Recv> {
        loop {
            let Some(timeout) = self.remaining() else {
                return Ok(Recv::Timeout);
            };
            self.inner
                .set_read_timeout(timeout)
                .map_err(|err| IoError::Other(err, IoOperation::SetReadTimeout))?;
            match self.inner.recv_from_into_buf(buf) {
                Ok((bytes_read, addr)) => {
                    tracing::trace!(
                        buf = format!("{:02x?}", buf[..bytes_read].iter().format(" ")),
                        bytes_read,
                        ?addr
                    );
                    return Ok(Recv::Data(bytes_read, addr));
                }
                Err(err)
                    if matches!(
                        err.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
                {
                    return Ok(Recv::Timeout);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(IoError::Other(err, IoOperation::RecvFrom)),
            }
        }
    }
    #[instrument(skip(self), ret, level = "trace")]
    fn local_identifier(&mut self) -> IoResult<Option<u16>> {
        if cfg!(target_os = "linux") {
            let port = self
                .inner
                .local_addr()
                .map_err(|err| IoError::Other(err, IoOperation::LocalAddr))?
                .as_socket()
                .map(|addr| addr.port());
            Ok(port.filter(|&port| port != 0))
        } else {
            Ok(None)
        }
    }
}

/// An extension trait to allow `recv_from` method which writes to a `&mut [u8]`.
///
/// This is required for `socket2::Socket` which [does not currently provide] this method.
///
/// [does not currently provide]: https://github.com/rust-lang/socket2/issues/223
trait RecvFrom {
    fn recv_from_into_buf(&self, buf: &mut [u8]) -> io::Result<(usize, Option<SocketAddr>)>;
}

impl RecvFrom for socket2::Socket {
    // Safety: the `recv` implementation promises not to write uninitialised
    // bytes to the `buf`fer, so this casting is safe.
    #![allow(unsafe_code)]
    fn recv_from_into_buf(&self, buf: &mut [u8]) -> io::Result<(usize, Option<SocketAddr>)> {
        let buf = unsafe {
            &mut *(std::ptr::from_mut::<[u8]>(buf) as *mut [std::mem::MaybeUninit<u8>])
        };
        self.recv_from(buf)
            .map(|(size, addr)| (size, addr.as_socket()))
    }
}
