/// Structured logging for the flood-zone risk service
///
/// Provides context-rich logging with component and zone identifiers,
/// timestamps, and severity levels. Supports both console output and
/// file-based logging for unattended runs.

use crate::analysis::CategoryCounts;
use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// Which part of the service emitted a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Registry,
    Evaluator,
    Config,
    Report,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Registry => write!(f, "ZONES"),
            Component::Evaluator => write!(f, "RISK"),
            Component::Config => write!(f, "CFG"),
            Component::Report => write!(f, "REPORT"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance. Messages are dropped until `init_logger` runs.
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    fn format_entry(
        level: LogLevel,
        component: Component,
        zone: Option<&str>,
        message: &str,
    ) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let zone_part = zone.map(|z| format!(" [{}]", z)).unwrap_or_default();
        format!("{} {} {}{}: {}", timestamp, level, component, zone_part, message)
    }

    fn log(&self, level: LogLevel, component: Component, zone: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let log_entry = Self::format_entry(level, component, zone, message);
        let zone_part = zone.map(|z| format!(" [{}]", z)).unwrap_or_default();

        // Console output goes to stderr so stdout stays clean for reports.
        if self.console_timestamps {
            eprintln!("{}", log_entry);
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", component, zone_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", component, zone_part, message),
                LogLevel::Info => eprintln!("   {}", message),
                LogLevel::Debug => eprintln!("   [DEBUG] {}{}: {}", component, zone_part, message),
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    let logger = Logger {
        min_level,
        log_file: log_file.map(String::from),
        console_timestamps,
    };
    match LOGGER.lock() {
        Ok(mut guard) => *guard = Some(logger),
        Err(poisoned) => *poisoned.into_inner() = Some(logger),
    }
}

fn emit(level: LogLevel, component: Component, zone: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, component, zone, message);
        }
    }
}

/// Log a general informational message
pub fn info(component: Component, zone: Option<&str>, message: &str) {
    emit(LogLevel::Info, component, zone, message);
}

/// Log a warning message
pub fn warn(component: Component, zone: Option<&str>, message: &str) {
    emit(LogLevel::Warning, component, zone, message);
}

/// Log an error message
pub fn error(component: Component, zone: Option<&str>, message: &str) {
    emit(LogLevel::Error, component, zone, message);
}

/// Log a debug message
pub fn debug(component: Component, zone: Option<&str>, message: &str) {
    emit(LogLevel::Debug, component, zone, message);
}

// ---------------------------------------------------------------------------
// Structured Helpers
// ---------------------------------------------------------------------------

/// Log a rejected input at the boundary.
pub fn log_rejected_input(component: Component, what: &str, err: &dyn std::error::Error) {
    error(component, None, &format!("{} rejected: {}", what, err));
}

/// Log the outcome of an evaluation pass. Danger zones raise the level to
/// a warning so they stand out in unattended logs.
pub fn log_assessment_summary(counts: &CategoryCounts) {
    let message = format!(
        "Assessed {} zones: {} danger, {} caution, {} safe",
        counts.total(),
        counts.danger,
        counts.caution,
        counts.safe
    );

    if counts.total() == 0 {
        warn(Component::Evaluator, None, "No zones to assess");
    } else if counts.danger > 0 {
        warn(Component::Evaluator, None, &message);
    } else {
        info(Component::Evaluator, None, &message);
    }
}
