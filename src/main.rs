use std::{fs::File, process};

use strand_logging::{get_logger, log_error, log_info, log_severe, log_warning, set_logger, LogCategory, Logger};

mod config;
mod scenario;

use config::{ConfigError, DriverConfig};

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

static LOGGER : Logger = Logger::new();

fn main() {
    let config = match DriverConfig::from_args(std::env::args_os()) {
        Ok(config) => config,
        // Also covers `--help` and `--version`, which clap reports as errors
        Err(ConfigError::Args(err)) => err.exit(),
        Err(err @ ConfigError::Invalid(_)) => {
            eprintln!("error: {err}");
            process::exit(2);
        },
    };

    set_logger(&LOGGER);
    let logger = get_logger();
    logger.set_max_level(config.log_level);
    logger.set_always_flush(config.always_flush);

    if let Some(path) = &config.log_file {
        match File::create(path) {
            Ok(file) => {
                if logger.add_writer(Box::new(file)).is_err() {
                    log_error!(LOG_CAT, main, "No writer slot left for log file '{}'", path.display());
                }
            },
            Err(err) => log_error!(LOG_CAT, main, "Failed to create log file '{}': {}", path.display(), err),
        }
    }

    if let Some(requested) = config.erase_clamped_from {
        log_warning!(LOG_CAT, "Erase count {} is more than half of {} elements, erasing {} instead", requested, config.count, config.erase_count);
    }

    log_info!(LOG_CAT, "Timing {} scenario(s) with {} elements", config.scenarios().len(), config.count);
    let result = scenario::run(&config);
    if let Err(err) = &result {
        log_severe!(LOG_CAT, main, "Scenario failed: {}", err);
    }

    // The logger is a static, so it is never dropped and has to be flushed manually
    logger.flush();
    if result.is_err() {
        process::exit(1);
    }
}
