use crate::TraceId;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Default values for configuration.
pub mod defaults {
    use std::time::Duration;

    /// The default value for `count`.
    pub const DEFAULT_COUNT: usize = 5;

    /// The default value for `read-timeout`.
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

    /// The default value for `interval`.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_micros(100);

    /// The default echo request payload.
    pub const DEFAULT_PAYLOAD: &[u8] = b"HELLO-R-U-THERE";
}

/// The maximum size of an inbound or outbound datagram.
pub const MAX_PACKET_SIZE: usize = 1500;

/// The maximum echo request payload size.
///
/// An `IPv4` header (20 bytes) plus the `ICMP` echo header (8 bytes) plus the
/// payload must fit in [`MAX_PACKET_SIZE`].
pub const MAX_PAYLOAD_SIZE: usize = MAX_PACKET_SIZE - 28;

/// The configuration of a single probe session.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PingConfig {
    pub target: Ipv4Addr,
    pub count: u16,
    pub read_timeout: Duration,
    pub interval: Duration,
    pub trace_identifier: TraceId,
    pub payload: Vec<u8>,
}

impl PingConfig {
    /// The worst case duration of a session with this configuration.
    #[must_use]
    pub fn max_duration(&self) -> Duration {
        (self.read_timeout + self.interval) * u32::from(self.count)
    }
}

/// The default trace identifier, derived from the process id.
#[must_use]
pub fn default_trace_identifier() -> TraceId {
    TraceId((std::process::id() % u32::from(u16::MAX)) as u16)
}
