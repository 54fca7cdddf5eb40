//! Logger setup: coloured terminal output plus an optional plain log file.
use anyhow::{Context, Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::env;
use std::fmt::{Arguments, Display};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;

/// Environment variable overriding the configured log level
pub const LOG_LEVEL_VAR: &str = "CLEANBOT_LOG_LEVEL";

/// Where records below warning level are written
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogOutput {
    /// Info and below on stdout, warnings and errors on stderr
    Split,
    /// Every record on stderr, leaving stdout to the program's own output
    Stderr,
}

impl LogOutput {
    /// Maximum levels for the stdout and stderr streams
    pub fn stream_levels(self, level: LevelFilter) -> (LevelFilter, LevelFilter) {
        match self {
            LogOutput::Split => (level, level.min(LevelFilter::Warn)),
            LogOutput::Stderr => (LevelFilter::Off, level),
        }
    }
}

/// Parse a log level name
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    Ok(match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {}", unknown),
    })
}

/// Initialise the global logger
///
/// The `CLEANBOT_LOG_LEVEL` environment variable wins over `level_from_config`.
/// `output` decides which terminal stream carries the records below warning level.
pub fn init(
    level_from_config: &str,
    log_file_path: Option<&Path>,
    output: LogOutput,
) -> Result<()> {
    let level = env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| level_from_config.to_string());
    let level = parse_level(&level)?;
    let (stdout_level, stderr_level) = output.stream_levels(level);

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let use_colour_stdout = std::io::stdout().is_terminal();
    let use_colour_stderr = std::io::stderr().is_terminal();

    let mut dispatch = Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stdout, &colours);
                })
                .level(stdout_level)
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stderr, &colours);
                })
                .level(stderr_level)
                .chain(std::io::stderr()),
        );

    if let Some(path) = log_file_path {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        dispatch = dispatch.chain(Dispatch::new().format(write_log_plain).level(level).chain(file));
    }

    dispatch.apply().context("Logger already initialised")?;
    Ok(())
}

fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");

    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

fn write_log_colour(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    use_colour: bool,
    colours: &ColoredLevelConfig,
) {
    if use_colour {
        write_log(out, colours.color(record.level()), record.target(), message);
    } else {
        write_log_plain(out, message, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level("trace").unwrap(), LevelFilter::Trace);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_split_output_levels() {
        let (stdout, stderr) = LogOutput::Split.stream_levels(LevelFilter::Debug);
        assert_eq!(stdout, LevelFilter::Debug);
        assert_eq!(stderr, LevelFilter::Warn);
    }

    #[test]
    fn test_stderr_output_leaves_stdout_silent() {
        let (stdout, stderr) = LogOutput::Stderr.stream_levels(LevelFilter::Trace);
        assert_eq!(stdout, LevelFilter::Off);
        assert_eq!(stderr, LevelFilter::Trace);

        let (_, stderr) = LogOutput::Stderr.stream_levels(LevelFilter::Error);
        assert_eq!(stderr, LevelFilter::Error);
    }
}
