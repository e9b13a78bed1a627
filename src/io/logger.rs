//! Stderr backend for the `log` facade

use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    // Allow print: stderr is this logger's sink
    #[allow(clippy::print_stderr)]
    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{}",
                format_line(record.level(), record.target(), &record.args().to_string())
            );
        }
    }

    fn flush(&self) {}
}

/// Render one log line as `[LEVEL] target: message`
pub fn format_line(level: Level, target: &str, message: &str) -> String {
    format!("[{level:>5}] {target}: {message}")
}

/// Verbosity for the given command-line flags; `quiet` wins over `debug`
pub const fn level_filter(quiet: bool, debug: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the stderr logger and set the maximum level
///
/// Safe to call more than once; later calls only change the level.
pub fn init(level: LevelFilter) {
    // Already installed on repeat calls
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
