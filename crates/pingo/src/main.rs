#![forbid(unsafe_code)]

use crate::config::{Args, PingoConfig};
use clap::Parser;

mod app;
mod config;
mod frontend;
mod report;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = PingoConfig::try_from(args)?;
    app::run_pingo(&cfg)
}
