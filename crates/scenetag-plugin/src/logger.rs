//! Host-facing log sink and progress reporter.
//!
//! The host demultiplexes plugin diagnostics out of the output stream by
//! a framed line protocol: an SOH byte, one level byte, an STX byte, the
//! message, a newline. Level bytes: `t` trace, `d` debug, `i` info,
//! `w` warning, `e` error, `p` progress. Progress frames carry a
//! fraction in `[0, 1]` as a plain decimal.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;

const FRAME_START: char = '\u{1}';
const FRAME_SEP: char = '\u{2}';

fn level_byte(level: Level) -> char {
    match level {
        Level::Error => 'e',
        Level::Warn => 'w',
        Level::Info => 'i',
        Level::Debug => 'd',
        Level::Trace => 't',
    }
}

fn format_line(level: Level, message: &str) -> String {
    format!("{FRAME_START}{}{FRAME_SEP}{message}\n", level_byte(level))
}

fn format_progress(fraction: f64) -> String {
    format!("{FRAME_START}p{FRAME_SEP}{}\n", fraction.clamp(0.0, 1.0))
}

fn emit(line: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(line.as_bytes());
    let _ = stdout.flush();
}

/// `log::Log` implementation speaking the host's framed line protocol.
struct HostLogger;

static HOST_LOGGER: HostLogger = HostLogger;

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        emit(&format_line(record.level(), &record.args().to_string()));
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Install the host sink.
///
/// Level precedence: `SCENETAG_LOG` environment variable, then the
/// verbosity flags, then info.
pub fn init(verbose: bool, quiet: bool) {
    let level = match std::env::var("SCENETAG_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
    {
        Some(level) => level,
        None if quiet => LevelFilter::Warn,
        None if verbose => LevelFilter::Debug,
        None => LevelFilter::Info,
    };

    // Ignore error if a logger is already set (e.g. in tests).
    if log::set_logger(&HOST_LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Sink for fractional task progress.
pub trait ProgressSink: Send + Sync {
    /// Report completion as a fraction in `[0, 1]`; values outside the
    /// range are clamped. Monotonic increase is expected of callers but
    /// not enforced here.
    fn report(&self, fraction: f64);
}

/// Progress sink speaking the host's framed line protocol.
pub struct HostProgress;

impl ProgressSink for HostProgress {
    fn report(&self, fraction: f64) {
        emit(&format_progress(fraction));
    }
}
