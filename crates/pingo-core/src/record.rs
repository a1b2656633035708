use crate::error::{Error, Result};
use crate::Sequence;
use std::net::Ipv4Addr;
use std::time::Duration;

/// The reason a probe did not succeed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ProbeError {
    /// No matching reply arrived before the read deadline.
    Timeout,
    /// A reply was received which could not be decoded.
    Decode(String),
}

/// The outcome of a single probe.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ProbeOutcome {
    /// A matching reply was received after the given round-trip time.
    Success(Duration),
    /// The probe failed.
    Error(ProbeError),
}

impl ProbeOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The round-trip time, if the probe succeeded.
    #[must_use]
    pub const fn round_trip(&self) -> Option<Duration> {
        match self {
            Self::Success(rtt) => Some(*rtt),
            Self::Error(_) => None,
        }
    }
}

/// A single probe of a session.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Probe {
    sequence: Sequence,
    outcome: ProbeOutcome,
}

impl Probe {
    #[must_use]
    pub const fn sequence(&self) -> Sequence {
        self.sequence
    }

    #[must_use]
    pub const fn outcome(&self) -> &ProbeOutcome {
        &self.outcome
    }
}

/// The record of a probe session for a single target.
///
/// Probes are held in sequence order, starting at 1 with no gaps, and the
/// received and error counts always sum to the number of probes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PingRecord {
    target: Ipv4Addr,
    probes: Vec<Probe>,
    received: usize,
    errors: usize,
}

impl PingRecord {
    #[must_use]
    pub const fn new(target: Ipv4Addr) -> Self {
        Self {
            target,
            probes: Vec::new(),
            received: 0,
            errors: 0,
        }
    }

    /// Record the outcome of the next probe and return its sequence number.
    pub fn push(&mut self, outcome: ProbeOutcome) -> Result<Sequence> {
        let sequence = u16::try_from(self.probes.len() + 1)
            .map(Sequence)
            .map_err(|_| Error::SequenceExhausted(self.target))?;
        if outcome.is_success() {
            self.received += 1;
        } else {
            self.errors += 1;
        }
        self.probes.push(Probe { sequence, outcome });
        Ok(sequence)
    }

    #[must_use]
    pub const fn target(&self) -> Ipv4Addr {
        self.target
    }

    /// The probes of this session, in sequence order.
    #[must_use]
    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.probes.iter().map(Probe::outcome)
    }

    /// The round-trip times of all successful probes, in sequence order.
    pub fn round_trips(&self) -> impl Iterator<Item = Duration> + '_ {
        self.outcomes().filter_map(ProbeOutcome::round_trip)
    }

    #[must_use]
    pub const fn received_count(&self) -> usize {
        self.received
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors
    }

    /// The total number of probes recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}
