use crate::config::{LogFormat, Mode};
use std::time::Duration;

/// The default value for `mode`.
pub const DEFAULT_MODE: Mode = Mode::Tui;

/// The default value for `log-format`.
pub const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Compact;

/// The default value for `log-filter`.
pub const DEFAULT_LOG_FILTER: &str = "pingo=debug";

/// The default value for `log-file`.
pub const DEFAULT_LOG_FILE: &str = "./pingo.log";

/// The rate at which the TUI checks for input and completed sessions.
pub const TUI_REFRESH_RATE: Duration = Duration::from_millis(100);
