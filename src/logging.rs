use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use thiserror::Error;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {m}{n}";

/// Sets up logging to stdout and, if a path is given, to a log file
///
/// # Arguments
///
/// * 'log_path' - optional path to a log file
/// * 'log_level' - the log level
/// * 'log_to_stdout' - whether to also log to stdout
pub fn setup_logger(log_path: Option<&str>, log_level: LevelFilter, log_to_stdout: bool) -> Result<Handle, LoggerError> {
    let config = build_config(log_path, log_level, log_to_stdout)?;

    let handle = log4rs::init_config(config)
        .map_err(|e| LoggerError(e.to_string()))?;

    Ok(handle)
}

/// Builds the log4rs configuration
///
/// # Arguments
///
/// * 'log_path' - optional path to a log file
/// * 'log_level' - the log level
/// * 'log_to_stdout' - whether to also log to stdout
fn build_config(log_path: Option<&str>, log_level: LevelFilter, log_to_stdout: bool) -> Result<Config, LoggerError> {
    let mut builder = Config::builder();
    let mut root = Root::builder();

    if log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .target(Target::Stdout)
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if let Some(path) = log_path {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(path)
            .map_err(|e| LoggerError(format!("log file {}: {}", path, e.to_string())))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    builder.build(root.build(log_level))
        .map_err(|e| LoggerError(e.to_string()))
}

/// Error depicting errors that occur while setting up logging
///
#[derive(Debug, Error)]
#[error("LoggerError: {0}")]
pub struct LoggerError(pub String);
