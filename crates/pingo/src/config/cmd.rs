use crate::config::{LogFormat, Mode};
use clap::Parser;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

/// Probe hosts with ICMP echo requests and record reachability and latency
#[derive(Parser, Debug)]
#[command(name = "pingo", author, version, about, long_about = None)]
pub struct Args {
    /// A space delimited list of IPv4 addresses to probe at startup
    pub targets: Vec<Ipv4Addr>,

    /// Output mode [default: tui]
    #[arg(value_enum, short = 'm', long)]
    pub mode: Option<Mode>,

    /// The number of echo requests sent to each target [default: 5]
    #[arg(short = 'c', long)]
    pub count: Option<usize>,

    /// The time to wait for each echo reply [default: 100ms]
    #[arg(short = 't', long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// The delay between consecutive echo requests [default: 100us]
    #[arg(short = 'i', long, value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// The echo request payload [default: HELLO-R-U-THERE]
    #[arg(long)]
    pub payload: Option<String>,

    /// Enable verbose debug logging to the log file
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// The debug log format [default: compact]
    #[arg(value_enum, long)]
    pub log_format: Option<LogFormat>,

    /// The debug log filter [default: pingo=debug]
    #[arg(long)]
    pub log_filter: Option<String>,

    /// The debug log file [default: ./pingo.log]
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
}

fn parse_duration(value: &str) -> anyhow::Result<Duration> {
    Ok(humantime::parse_duration(value)?)
}
