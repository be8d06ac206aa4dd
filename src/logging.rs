use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct FitWatchLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

/// Pulls the number following `prefix` out of a message, e.g. `PC=12`
fn extract_number(message: &str, prefix: &str) -> Option<u64> {
    let start = message.find(prefix)? + prefix.len();
    let digits: String = message[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

impl log::Log for FitWatchLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Topic filters only narrow debug and trace output
        match &self.debug_filters {
            Some(filters) if metadata.level() >= log::Level::Debug => {
                filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()))
            }
            _ => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let mut context = String::new();
        if let Some(cycle) = extract_number(&message, "Cycle ") {
            context.push_str(&format!("[C{:04}]", cycle));
        }
        if let Some(pc) = extract_number(&message, "PC=") {
            context.push_str(&format!("[PC{:03}]", pc));
        }
        if !context.is_empty() {
            context.push(' ');
        }

        // stdout carries the routine JSON, so diagnostics go to stderr
        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: OnceLock<FitWatchLogger> = OnceLock::new();

/// Installs the logger. `debug_filter` is a comma-separated list of topics
/// (`loader`, `vm`, `instructions`, `sensors`) that limits debug output.
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| FitWatchLogger {
        level,
        debug_filters: debug_filter.map(|filter_str| {
            filter_str
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<HashSet<String>>()
        }),
    });

    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Maps a `--log-level` argument to a filter, defaulting to `Info`
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_loader {
    ($($arg:tt)*) => {
        log::debug!(target: "loader", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_vm {
    ($($arg:tt)*) => {
        log::debug!(target: "vm", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_instructions {
    ($($arg:tt)*) => {
        log::trace!(target: "instructions", "{}", format_args!($($arg)*))
    }
}
