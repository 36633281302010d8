//! `tracing` subscriber setup.
//!
//! Events are handed to a background writer thread, so logging from the
//! request path never blocks on stdout. When the writer falls behind, lines
//! are dropped rather than stalling callers.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reqmeter_core::error::{Result, ReqMeterError};

use crate::config::{LogFormat, LoggingSection};

/// Install the global subscriber. `RUST_LOG` wins over `logging.filter`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the writer thread.
pub fn init(cfg: &LoggingSection) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.filter))
        .map_err(|e| ReqMeterError::Config(format!("invalid logging.filter: {e}")))?;

    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    let registry = tracing_subscriber::registry().with(filter);
    let res = match cfg.format {
        LogFormat::Pretty => registry.with(fmt::layer().with_writer(writer)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false).with_writer(writer))
            .try_init(),
    };
    res.map_err(|e| ReqMeterError::Internal(format!("logging init failed: {e}")))?;

    Ok(guard)
}
