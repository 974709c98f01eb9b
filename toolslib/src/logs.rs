//! Programmatically bootstrap `log4rs` for the command line.
//!
//! The forecast command runs and exits, so there is no need for an external logging
//! configuration file. Output always goes to `stderr` leaving `stdout` for reports,
//! with an optional log file that can capture more detail than the console.
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{
        runtime::{ConfigErrors, Logger},
        Appender, Config, Root,
    },
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Handle,
};
use std::{fmt, io, path::PathBuf};

/// An error that can be returned from the `logs` module when initializing `log4rs`.
#[derive(Debug)]
pub struct LogError(String);
impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<ConfigErrors> for LogError {
    fn from(error: ConfigErrors) -> Self {
        LogError(format!("{error}"))
    }
}
impl From<log::SetLoggerError> for LogError {
    fn from(error: log::SetLoggerError) -> Self {
        LogError(format!("{error}"))
    }
}
impl From<io::Error> for LogError {
    fn from(error: io::Error) -> Self {
        LogError(format!("{error}"))
    }
}

/// The console pattern.
#[cfg(not(debug_assertions))]
const CONSOLE_PATTERN: &str = "{l:<5} {M} {m}{n}";
#[cfg(debug_assertions)]
const CONSOLE_PATTERN: &str = "{l:<5} {f}:{L} {m}{n}";

/// The log file pattern.
#[cfg(not(debug_assertions))]
const FILE_PATTERN: &str = "{d(%H:%M:%S%.3f)}|{l:<5}|{M} {m}{n}";
#[cfg(debug_assertions)]
const FILE_PATTERN: &str = "{d(%H:%M:%S%.3f)}|{l:<5}|{f}:{L} {m}{n}";

/// The properties used to initialize `log4rs`.
#[derive(Debug)]
pub struct LogProperties {
    /// The log level that will be used.
    pub level: log::LevelFilter,
    /// The path of the log file, if `None` logging to a file will not occur.
    pub logfile_path: Option<PathBuf>,
    /// Append to the log file instead of truncating it.
    pub logfile_append: bool,
    /// The module loggers whose output is routed only to the log file.
    pub file_loggers: Vec<String>,
}
impl Default for LogProperties {
    /// `Warn` level console logging without a log file.
    fn default() -> Self {
        Self { level: log::LevelFilter::Warn, logfile_path: None, logfile_append: false, file_loggers: vec![] }
    }
}

/// Maps the number of `-v` flags to a log level.
///
/// # Arguments
///
/// * `verbosity` is how many times verbose output was requested.
pub fn level_from_verbosity(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Initializes `log4rs` with a console logger (`stderr`) and an optional file logger.
///
/// When a log file is used the console is capped at `Info` so debug output only lands
/// in the file.
///
/// # Arguments
///
/// * `log_properties` the properties that define the behaviour of `log4rs`.
pub fn initialize(log_properties: LogProperties) -> Result<Handle, LogError> {
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let console_level = match (&log_properties.logfile_path, log_properties.level) {
        (Some(_), log::LevelFilter::Debug | log::LevelFilter::Trace) => log::LevelFilter::Info,
        (_, level) => level,
    };
    let mut config_builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(console_level)))
            .build("console", Box::new(console_appender)),
    );
    let mut root_builder = Root::builder().appender("console");
    if let Some(log_pathname) = log_properties.logfile_path {
        let file_appender = FileAppender::builder()
            .append(log_properties.logfile_append)
            .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
            .build(log_pathname)?;
        config_builder = config_builder.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_properties.level)))
                .build("file", Box::new(file_appender)),
        );
        root_builder = root_builder.appender("file");
        let loggers = log_properties
            .file_loggers
            .iter()
            .map(|logger| Logger::builder().appender("file").additive(false).build(logger, log_properties.level));
        config_builder = config_builder.loggers(loggers);
    }
    let config = config_builder.build(root_builder.build(log_properties.level))?;
    Ok(log4rs::init_config(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity() {
        assert_eq!(level_from_verbosity(0), log::LevelFilter::Warn);
        assert_eq!(level_from_verbosity(1), log::LevelFilter::Info);
        assert_eq!(level_from_verbosity(2), log::LevelFilter::Debug);
        assert_eq!(level_from_verbosity(3), log::LevelFilter::Trace);
        assert_eq!(level_from_verbosity(9), log::LevelFilter::Trace);
    }

    #[test]
    fn defaults() {
        let testcase = LogProperties::default();
        assert_eq!(testcase.level, log::LevelFilter::Warn);
        assert!(testcase.logfile_path.is_none());
        assert!(!testcase.logfile_append);
        assert!(testcase.file_loggers.is_empty());
    }
}
