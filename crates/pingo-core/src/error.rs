use std::fmt::{Display, Formatter};
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use thiserror::Error;

/// A pinger error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A pinger error.
///
/// Any of these aborts the probe session in which it occurs. Per-probe
/// failures (timeouts and malformed replies) are not errors, they are
/// recorded as a [`crate::ProbeOutcome`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] IoError),
    #[error("short write to {addr}: sent {sent} of {expected} bytes")]
    ShortWrite {
        addr: SocketAddr,
        sent: usize,
        expected: usize,
    },
    #[error("invalid packet: {0}")]
    Packet(#[from] pingo_packet::error::Error),
    #[error("index {index} out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no sequence numbers remaining for {0}")]
    SequenceExhausted(Ipv4Addr),
    #[error("invalid config: {0}")]
    BadConfig(String),
    #[error("probe session for {0} panicked")]
    SessionPanicked(Ipv4Addr),
}

/// Custom IO error result.
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Custom IO error.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Bind error for {1}: {0}")]
    Bind(io::Error, SocketAddr),
    #[error("Sendto error for {1}: {0}")]
    SendTo(io::Error, SocketAddr),
    #[error("Failed to {1}: {0}")]
    Other(io::Error, IoOperation),
}

impl IoError {
    /// The underlying [`io::ErrorKind`].
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Bind(e, _) | Self::SendTo(e, _) | Self::Other(e, _) => e.kind(),
        }
    }
}

/// Io operation.
#[derive(Debug)]
pub enum IoOperation {
    NewSocket,
    SetReadTimeout,
    RecvFrom,
    LocalAddr,
    SpawnThread,
}

impl Display for IoOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewSocket => write!(f, "create new socket"),
            Self::SetReadTimeout => write!(f, "set read timeout"),
            Self::RecvFrom => write!(f, "recv from"),
            Self::LocalAddr => write!(f, "local addr"),
            Self::SpawnThread => write!(f, "spawn thread"),
        }
    }
}
