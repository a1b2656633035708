use anyhow::anyhow;
use clap::ValueEnum;
use pingo_core::{defaults, Builder, MAX_PAYLOAD_SIZE};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

mod cmd;
pub mod constants;

pub use cmd::Args;

/// The tool mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum Mode {
    /// Display interactive TUI.
    Tui,
    /// Generate a pretty text table report of the targets.
    Pretty,
    /// Generate a Markdown text table report of the targets.
    Markdown,
}

/// How to format log data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Display log data in a compact format.
    Compact,
    /// Display log data in a pretty format.
    Pretty,
    /// Display log data in a json format.
    Json,
}

/// Fully parsed and validated configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PingoConfig {
    pub targets: Vec<Ipv4Addr>,
    pub mode: Mode,
    pub count: usize,
    pub read_timeout: Duration,
    pub interval: Duration,
    pub payload: Vec<u8>,
    pub verbose: bool,
    pub log_format: LogFormat,
    pub log_filter: String,
    pub log_file: PathBuf,
}

impl PingoConfig {
    /// The probe session builder for this configuration.
    ///
    /// The target is a placeholder which is replaced for every probed address.
    pub fn builder(&self) -> Builder {
        Builder::new(Ipv4Addr::UNSPECIFIED)
            .count(self.count)
            .read_timeout(self.read_timeout)
            .interval(self.interval)
            .payload(self.payload.clone())
    }
}

impl TryFrom<Args> for PingoConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> anyhow::Result<Self> {
        let mode = args.mode.unwrap_or(constants::DEFAULT_MODE);
        let count = args.count.unwrap_or(defaults::DEFAULT_COUNT);
        let payload = args
            .payload
            .map_or_else(|| defaults::DEFAULT_PAYLOAD.to_vec(), String::into_bytes);
        validate_count(count)?;
        validate_payload(&payload)?;
        validate_targets(mode, &args.targets)?;
        Ok(Self {
            targets: args.targets,
            mode,
            count,
            read_timeout: args.timeout.unwrap_or(defaults::DEFAULT_READ_TIMEOUT),
            interval: args.interval.unwrap_or(defaults::DEFAULT_INTERVAL),
            payload,
            verbose: args.verbose,
            log_format: args.log_format.unwrap_or(constants::DEFAULT_LOG_FORMAT),
            log_filter: args
                .log_filter
                .unwrap_or_else(|| String::from(constants::DEFAULT_LOG_FILTER)),
            log_file: args
                .log_file
                .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_LOG_FILE)),
        })
    }
}

impl Default for PingoConfig {
    fn default() -> Self {
        Self {
            targets: vec![],
            mode: constants::DEFAULT_MODE,
            count: defaults::DEFAULT_COUNT,
            read_timeout: defaults::DEFAULT_READ_TIMEOUT,
            interval: defaults::DEFAULT_INTERVAL,
            payload: defaults::DEFAULT_PAYLOAD.to_vec(),
            verbose: false,
            log_format: constants::DEFAULT_LOG_FORMAT,
            log_filter: String::from(constants::DEFAULT_LOG_FILTER),
            log_file: PathBuf::from(constants::DEFAULT_LOG_FILE),
        }
    }
}

fn validate_count(count: usize) -> anyhow::Result<()> {
    if count == 0 {
        Err(anyhow!("count ({count}) must be at least 1"))
    } else if count > usize::from(u16::MAX) {
        Err(anyhow!("count ({count}) must be at most {}", u16::MAX))
    } else {
        Ok(())
    }
}

fn validate_payload(payload: &[u8]) -> anyhow::Result<()> {
    if payload.is_empty() {
        Err(anyhow!("payload must not be empty"))
    } else if payload.len() > MAX_PAYLOAD_SIZE {
        Err(anyhow!(
            "payload ({} bytes) must be at most {MAX_PAYLOAD_SIZE} bytes",
            payload.len()
        ))
    } else {
        Ok(())
    }
}

/// Report modes probe the given targets once and so require at least one.
fn validate_targets(mode: Mode, targets: &[Ipv4Addr]) -> anyhow::Result<()> {
    if targets.is_empty() && matches!(mode, Mode::Pretty | Mode::Markdown) {
        Err(anyhow!("at least one target is required in report mode"))
    } else {
        Ok(())
    }
}
