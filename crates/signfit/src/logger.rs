//! Log output for the `signfit` binary.
//!
//! The library crates only talk to the `log` facade; installing a sink is the
//! binary's job. Without the `tracing` feature that sink is [`init_logging`],
//! which writes `[+elapsed LEVEL target] message` lines to stderr. With it,
//! [`init_tracing`] routes `log` records into a `tracing-subscriber` formatter.

use std::io::Write;
use std::time::{Duration, Instant};

use log::{LevelFilter, Log, Metadata, Record};

struct CliLogger {
    level: LevelFilter,
    started: Instant,
}

impl CliLogger {
    fn new(level: LevelFilter) -> Self {
        Self {
            level,
            started: Instant::now(),
        }
    }

    fn render(&self, elapsed: Duration, record: &Record) -> String {
        format!(
            "[+{:9.3}ms {:<5} {}] {}",
            elapsed.as_secs_f64() * 1e3,
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.render(self.started.elapsed(), record);
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the stderr logger. Fails if a logger is already installed.
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(CliLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing` subscriber and forward `log` records to it.
///
/// `RUST_LOG` overrides `level` when set.
#[cfg(feature = "tracing")]
pub fn init_tracing(
    level: LevelFilter,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    if json {
        tracing::subscriber::set_global_default(builder.json().flatten_event(true).finish())?;
    } else {
        tracing::subscriber::set_global_default(
            builder.with_timer(fmt::time::Uptime::default()).finish(),
        )?;
    }
    tracing_log::LogTracer::init_with_filter(level)?;
    Ok(())
}
