use crate::config::{LogFormat, Mode, PingoConfig};
use crate::{frontend, report};
use anyhow::Context;
use std::fs::File;
use std::sync::Mutex;

/// Run the pingo application.
pub fn run_pingo(cfg: &PingoConfig) -> anyhow::Result<()> {
    configure_logging(cfg)?;
    let builder = cfg.builder();
    match cfg.mode {
        Mode::Tui => frontend::run_frontend(builder, &cfg.targets),
        Mode::Pretty => report::table::report_pretty(&builder, &cfg.targets),
        Mode::Markdown => report::table::report_md(&builder, &cfg.targets),
    }
}

/// Configure the logging.
///
/// Log data is written to the log file so as not to interfere with the TUI.
fn configure_logging(cfg: &PingoConfig) -> anyhow::Result<()> {
    if cfg.verbose {
        let file = File::options()
            .create(true)
            .append(true)
            .open(&cfg.log_file)
            .with_context(|| format!("failed to open log file {}", cfg.log_file.display()))?;
        let writer = Mutex::new(file);
        match cfg.log_format {
            LogFormat::Compact => {
                tracing_subscriber::fmt()
                    .with_env_filter(&cfg.log_filter)
                    .with_writer(writer)
                    .with_ansi(false)
                    .compact()
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .with_env_filter(&cfg.log_filter)
                    .with_writer(writer)
                    .with_ansi(false)
                    .pretty()
                    .init();
            }
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .with_env_filter(&cfg.log_filter)
                    .with_writer(writer)
                    .json()
                    .init();
            }
        }
    }
    Ok(())
}
