use crate::config::{defaults, default_trace_identifier, PingConfig, MAX_PAYLOAD_SIZE};
use crate::error::Result;
use crate::{Error, Pinger, TraceId};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Build a pinger.
///
/// This is a convenience builder to simplify the creation of a [`Pinger`].
///
/// # Examples
///
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// use pingo_core::Builder;
/// use std::time::Duration;
///
/// let addr = std::net::Ipv4Addr::new(1, 2, 3, 4);
/// let pinger = Builder::new(addr)
///     .count(10)
///     .read_timeout(Duration::from_millis(250))
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Pinger`] - An `ICMP` echo probe session.
#[derive(Debug, Clone)]
pub struct Builder {
    target: Ipv4Addr,
    count: usize,
    read_timeout: Duration,
    interval: Duration,
    trace_identifier: Option<TraceId>,
    payload: Vec<u8>,
}

impl Builder {
    /// Build a pinger builder for a given target.
    #[must_use]
    pub fn new(target: Ipv4Addr) -> Self {
        Self {
            target,
            count: defaults::DEFAULT_COUNT,
            read_timeout: defaults::DEFAULT_READ_TIMEOUT,
            interval: defaults::DEFAULT_INTERVAL,
            trace_identifier: None,
            payload: defaults::DEFAULT_PAYLOAD.to_vec(),
        }
    }

    /// Set the target address.
    #[must_use]
    pub fn target(self, target: Ipv4Addr) -> Self {
        Self { target, ..self }
    }

    /// Set the number of echo requests to send.
    #[must_use]
    pub fn count(self, count: usize) -> Self {
        Self { count, ..self }
    }

    /// Set the time to wait for each echo reply.
    #[must_use]
    pub fn read_timeout(self, read_timeout: Duration) -> Self {
        Self {
            read_timeout,
            ..self
        }
    }

    /// Set the delay between consecutive echo requests.
    #[must_use]
    pub fn interval(self, interval: Duration) -> Self {
        Self { interval, ..self }
    }

    /// Set the `ICMP` identifier.
    ///
    /// If not set the identifier is derived from the process id.  Note that
    /// on some platforms the identifier is assigned by the socket and this
    /// value is ignored.
    #[must_use]
    pub fn trace_identifier(self, trace_id: u16) -> Self {
        Self {
            trace_identifier: Some(TraceId(trace_id)),
            ..self
        }
    }

    /// Set the echo request payload.
    #[must_use]
    pub fn payload(self, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            ..self
        }
    }

    /// Build the `Pinger`.
    pub fn build(self) -> Result<Pinger> {
        let count = match u16::try_from(self.count) {
            Ok(0) => Err(Error::BadConfig(String::from("count must be at least 1"))),
            Ok(count) => Ok(count),
            Err(_) => Err(Error::BadConfig(format!(
                "count must be at most {}",
                u16::MAX
            ))),
        }?;
        if self.payload.is_empty() {
            return Err(Error::BadConfig(String::from("payload must not be empty")));
        }
        if self.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::BadConfig(format!(
                "payload must be at most {MAX_PAYLOAD_SIZE} bytes"
            )));
        }
        Ok(Pinger::new(PingConfig {
            target: self.target,
            count,
            read_timeout: self.read_timeout,
            interval: self.interval,
            trace_identifier: self.trace_identifier.unwrap_or_else(default_trace_identifier),
            payload: self.payload,
        }))
    }
}
