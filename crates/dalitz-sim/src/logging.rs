//! Stderr logger bootstrap.

use std::error::Error;

use flexi_logger::{Logger, LoggerHandle};
use log::debug;

/// Starts the stderr logger. The handle must stay alive for the process.
pub fn init(level: &str) -> Result<LoggerHandle, Box<dyn Error>> {
    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;
    debug!(
        "event=cli_start module=dalitz-sim level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
