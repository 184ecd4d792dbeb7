use core::{fmt, str::FromStr};
use std::{ffi::OsString, path::PathBuf};

use clap::{App, Arg};
use strand_logging::LogLevel;

/// Timed workload, each one runs on both containers
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Scenario {
    /// Append `count` elements
    Append,
    /// Append `count` elements, then pop them from the back
    PopBack,
    /// Append `count` elements, then pop them from the front
    PopFront,
    /// Append `count` elements, then erase `erase_count` elements at index `count / 2`
    EraseMiddle,
}

impl Scenario {
    pub const ALL : [Scenario; 4] = [Scenario::Append, Scenario::PopBack, Scenario::PopFront, Scenario::EraseMiddle];
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "append"       => Ok(Scenario::Append),
            "pop-back"     => Ok(Scenario::PopBack),
            "pop-front"    => Ok(Scenario::PopFront),
            "erase-middle" => Ok(Scenario::EraseMiddle),
            _              => Err(format!("Unknown scenario: '{s}'")),
        }
    }
}

/// Error while building the driver config
#[derive(Debug)]
pub enum ConfigError {
    /// The command line could not be parsed, or help/version info was requested
    Args(clap::Error),
    /// An argument was parsed, but its value is invalid
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Args(err)     => f.write_str(&err.message),
            ConfigError::Invalid(text) => f.write_str(text),
        }
    }
}

/// Validated command line configuration of the driver
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DriverConfig {
    /// Number of elements every scenario starts from
    pub count       : usize,
    /// Number of middle erasures, never more than `count / 2`
    pub erase_count : usize,
    /// Requested erase count, when it had to be clamped to `count / 2`
    pub erase_clamped_from : Option<usize>,
    pub log_level   : LogLevel,
    pub log_file    : Option<PathBuf>,
    /// Flush the log after every message
    pub always_flush : bool,
    /// Scenario to run, `None` runs all of them
    pub scenario    : Option<Scenario>,
}

impl DriverConfig {
    pub const DEFAULT_COUNT : usize = 100_000;
    pub const DEFAULT_ERASE_COUNT : usize = 49_000;

    /// Parse the config from command line arguments, the first argument being the binary name
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError> where
        I : IntoIterator<Item = T>,
        T : Into<OsString> + Clone,
    {
        let matches = App::new("strand")
            .about("Times the growable array and the linked list doing the same work")
            .arg(Arg::with_name("count")
                .long("count")
                .short("n")
                .takes_value(true)
                .default_value("100000")
                .help("Number of elements every scenario starts from"))
            .arg(Arg::with_name("erase-count")
                .long("erase-count")
                .takes_value(true)
                .default_value("49000")
                .help("Number of elements erased from the middle, at most half of the count"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .takes_value(true)
                .possible_values(&["severe", "error", "warning", "info", "verbose", "debug"])
                .default_value("info"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .takes_value(true)
                .help("File the log is written to, next to the console"))
            .arg(Arg::with_name("always-flush")
                .long("always-flush")
                .help("Flush the log after every message"))
            .arg(Arg::with_name("scenario")
                .long("scenario")
                .takes_value(true)
                .possible_values(&["all", "append", "pop-back", "pop-front", "erase-middle"])
                .default_value("all"))
            .get_matches_from_safe(args)
            .map_err(ConfigError::Args)?;

        let count = parse_count(matches.value_of("count"), "count", Self::DEFAULT_COUNT)?;
        if count == 0 {
            return Err(ConfigError::Invalid("count must be at least 1".to_string()));
        }
        let erase_count = parse_count(matches.value_of("erase-count"), "erase-count", Self::DEFAULT_ERASE_COUNT)?;

        let log_level = match matches.value_of("log-level") {
            Some(level) => LogLevel::from_str(level).map_err(ConfigError::Invalid)?,
            None => LogLevel::Info,
        };

        let scenario = match matches.value_of("scenario") {
            None | Some("all") => None,
            Some(name) => Some(Scenario::from_str(name).map_err(ConfigError::Invalid)?),
        };

        let max_erase_count = count / 2;
        Ok(Self {
            count,
            erase_count: erase_count.min(max_erase_count),
            erase_clamped_from: (erase_count > max_erase_count).then_some(erase_count),
            log_level,
            log_file: matches.value_of("log-file").map(PathBuf::from),
            always_flush: matches.is_present("always-flush"),
            scenario,
        })
    }

    /// Get the scenarios selected to run, in the order they are run in
    pub fn scenarios(&self) -> Vec<Scenario> {
        match self.scenario {
            Some(scenario) => vec![scenario],
            None => Scenario::ALL.to_vec(),
        }
    }
}

fn parse_count(value: Option<&str>, name: &str, default: usize) -> Result<usize, ConfigError> {
    match value {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid(format!("{name} must be a non-negative integer, got '{value}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DriverConfig::from_args(["strand"]).unwrap();
        assert_eq!(config.count, 100_000);
        assert_eq!(config.erase_count, 49_000);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_file, None);
        assert_eq!(config.erase_clamped_from, None);
        assert!(!config.always_flush);
        assert_eq!(config.scenarios(), Scenario::ALL);
    }

    #[test]
    fn explicit_values() {
        let config = DriverConfig::from_args(["strand", "--count", "1000", "--erase-count", "10", "--log-level", "debug", "--log-file", "out.log", "--scenario", "pop-front", "--always-flush"]).unwrap();
        assert_eq!(config.count, 1000);
        assert_eq!(config.erase_count, 10);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("out.log")));
        assert_eq!(config.scenarios(), [Scenario::PopFront]);
        assert!(config.always_flush);
    }

    #[test]
    fn erase_count_is_clamped() {
        let config = DriverConfig::from_args(["strand", "-n", "10", "--erase-count", "20"]).unwrap();
        assert_eq!(config.erase_count, 5);
        assert_eq!(config.erase_clamped_from, Some(20));

        let config = DriverConfig::from_args(["strand", "-n", "10", "--erase-count", "5"]).unwrap();
        assert_eq!(config.erase_clamped_from, None);
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(DriverConfig::from_args(["strand", "--count", "many"]), Err(ConfigError::Invalid(_))));
        assert!(matches!(DriverConfig::from_args(["strand", "--count", "0"]), Err(ConfigError::Invalid(_))));
        assert!(matches!(DriverConfig::from_args(["strand", "--scenario", "sort"]), Err(ConfigError::Args(_))));
        assert!(matches!(DriverConfig::from_args(["strand", "--log-level", "loud"]), Err(ConfigError::Args(_))));
    }
}
