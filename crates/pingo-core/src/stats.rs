use crate::PingRecord;
use std::net::Ipv4Addr;
use std::time::Duration;

/// The mean round-trip time of all successful probes.
///
/// Returns `None` if no probe succeeded.
#[must_use]
pub fn average_round_trip(record: &PingRecord) -> Option<Duration> {
    let received = u32::try_from(record.received_count()).ok()?;
    if received == 0 {
        return None;
    }
    Some(record.round_trips().sum::<Duration>() / received)
}

/// The percentage of probes which succeeded.
///
/// Returns `None` if the record holds no probes.
#[must_use]
pub fn success_rate(record: &PingRecord) -> Option<f64> {
    let total = record.received_count() + record.error_count();
    if total == 0 {
        None
    } else {
        Some(record.received_count() as f64 / total as f64 * 100_f64)
    }
}

/// The percentage of probes which failed.
#[must_use]
pub fn loss_pct(record: &PingRecord) -> Option<f64> {
    success_rate(record).map(|rate| 100_f64 - rate)
}

/// The fastest round-trip time observed.
#[must_use]
pub fn best_round_trip(record: &PingRecord) -> Option<Duration> {
    record.round_trips().min()
}

/// The slowest round-trip time observed.
#[must_use]
pub fn worst_round_trip(record: &PingRecord) -> Option<Duration> {
    record.round_trips().max()
}

/// The sample standard deviation of the round-trip times, in milliseconds.
///
/// Returns `0` if fewer than two probes succeeded.
#[must_use]
pub fn stddev_ms(record: &PingRecord) -> f64 {
    let samples = record
        .round_trips()
        .map(|rtt| rtt.as_secs_f64() * 1000_f64)
        .collect::<Vec<_>>();
    if samples.len() < 2 {
        return 0_f64;
    }
    let count = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / count;
    let m2 = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>();
    (m2 / (count - 1_f64)).sqrt()
}

/// A summary of a [`PingRecord`] for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub target: Ipv4Addr,
    pub sent: usize,
    pub received: usize,
    pub errors: usize,
    pub avg: Option<Duration>,
    pub best: Option<Duration>,
    pub worst: Option<Duration>,
    pub stddev_ms: f64,
    pub success_rate: Option<f64>,
}

impl Summary {
    #[must_use]
    pub fn avg_ms(&self) -> Option<f64> {
        self.avg.map(as_ms)
    }

    #[must_use]
    pub fn best_ms(&self) -> Option<f64> {
        self.best.map(as_ms)
    }

    #[must_use]
    pub fn worst_ms(&self) -> Option<f64> {
        self.worst.map(as_ms)
    }

    #[must_use]
    pub fn loss_pct(&self) -> Option<f64> {
        self.success_rate.map(|rate| 100_f64 - rate)
    }
}

impl From<&PingRecord> for Summary {
    fn from(record: &PingRecord) -> Self {
        Self {
            target: record.target(),
            sent: record.len(),
            received: record.received_count(),
            errors: record.error_count(),
            avg: average_round_trip(record),
            best: best_round_trip(record),
            worst: worst_round_trip(record),
            stddev_ms: stddev_ms(record),
            success_rate: success_rate(record),
        }
    }
}

fn as_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000_f64
}
