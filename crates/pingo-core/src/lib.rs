//! Pingo - An `ICMP` echo probe library.
//!
//! This crate provides the probe engine used by the standalone `pingo`
//! application: it sends `ICMPv4` echo requests to a target over an
//! unprivileged datagram socket, correlates the echo replies and records the
//! outcome and round-trip time of every request.
//!
//! # Example
//!
//! The following example probes a target with the default configuration and
//! prints the average round-trip time:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use pingo_core::stats::average_round_trip;
//! use std::net::Ipv4Addr;
//!
//! let record = pingo_core::run_probe(Ipv4Addr::new(1, 1, 1, 1), 5)?;
//! println!("{:?}", average_round_trip(&record));
//! # Ok(())
//! # }
//! ```
//!
//! The following example probes several targets concurrently and collects the
//! records in a repository:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use pingo_core::{probe_all, Builder, SharedRepository};
//! use std::net::Ipv4Addr;
//! use std::time::Duration;
//!
//! let builder = Builder::new(Ipv4Addr::UNSPECIFIED).read_timeout(Duration::from_millis(500));
//! let repository = SharedRepository::new();
//! let targets = [Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(8, 8, 8, 8)];
//! for result in probe_all(&builder, &targets, &repository) {
//!     result?;
//! }
//! assert_eq!(2, repository.snapshot().len());
//! # Ok(())
//! # }
//! ```
//!
//! # See Also
//!
//! - [`Builder`] - Build a [`Pinger`].
//! - [`Pinger::run`] - Run a probe session on the current thread.
//! - [`Pinger::spawn`] - Run a probe session on a new thread.
//! - [`Repository`] - An ordered collection of [`PingRecord`].
#![deny(unsafe_code)]

mod builder;
mod config;
mod error;
mod net;
mod pinger;
mod record;
mod repository;
mod types;

pub mod codec;

/// Summary statistics of a [`PingRecord`].
pub mod stats;

use std::net::Ipv4Addr;

pub use builder::Builder;
pub use config::{defaults, PingConfig, MAX_PACKET_SIZE, MAX_PAYLOAD_SIZE};
pub use error::{Error, IoError, IoOperation, Result};
pub use pinger::{probe_all, Pinger};
pub use record::{PingRecord, Probe, ProbeError, ProbeOutcome};
pub use repository::{Repository, SharedRepository};
pub use types::{Sequence, TraceId};

/// Probe `target` with `count` echo requests using the default configuration.
pub fn run_probe(target: Ipv4Addr, count: usize) -> Result<PingRecord> {
    Builder::new(target).count(count).build()?.run()
}
