//! Run configuration.
//!
//! The command line is turned into a [Config] value that is handed to the
//! actors, nothing is read from global state.

use std::path::PathBuf;

use clap::ValueEnum;
use log::LevelFilter;

/// The action to execute on the populated system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Print all vouchers in the system.
    #[default]
    Print,

    /// Briefly describe the dataset.
    Summary,

    /// Rank the customers by amount of barcodes ordered.
    Top,
}

/// Where to read the data from and what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The barcode CSV file.
    pub barcodes: PathBuf,

    /// The order CSV file.
    pub orders: PathBuf,

    /// The action to execute.
    pub action: Action,

    /// Amount of customers listed by [Action::Top].
    pub limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            barcodes: PathBuf::from("barcodes.csv"),
            orders: PathBuf::from("orders.csv"),
            action: Action::default(),
            limit: 5,
        }
    }
}

/// Log levels from the most verbose to the quietest.
const LOG_LEVELS: [LevelFilter; 6] = [
    LevelFilter::Trace,
    LevelFilter::Debug,
    LevelFilter::Info,
    LevelFilter::Warn,
    LevelFilter::Error,
    LevelFilter::Off,
];

/// Index of the default level, `Warn`.
const DEFAULT_LOG_LEVEL: usize = 3;

/// Compute the log level from the amount of `--verbose` and `--quiet` flags.
///
/// ```
/// use log::LevelFilter;
/// use mini_vouchers::config::log_level;
///
/// assert_eq!(log_level(0, 0), LevelFilter::Warn);
/// assert_eq!(log_level(2, 0), LevelFilter::Debug);
/// assert_eq!(log_level(0, 1), LevelFilter::Error);
///
/// // the level saturates on both ends
/// assert_eq!(log_level(10, 0), LevelFilter::Trace);
/// assert_eq!(log_level(0, 10), LevelFilter::Off);
/// ```
pub fn log_level(verbose: u8, quiet: u8) -> LevelFilter {
    let index = (DEFAULT_LOG_LEVEL + usize::from(quiet))
        .saturating_sub(usize::from(verbose))
        .min(LOG_LEVELS.len() - 1);

    LOG_LEVELS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_and_quiet_cancel_out() {
        assert_eq!(log_level(2, 2), LevelFilter::Warn);
    }

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.action, Action::Print);
        assert_eq!(config.barcodes, PathBuf::from("barcodes.csv"));
        assert_eq!(config.orders, PathBuf::from("orders.csv"));
    }
}
