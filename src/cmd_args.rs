use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use clap::Parser;

use crate::config::{ConfigError, RowLimits};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Maximum number of characters per row.
    /// Falls back to ROWLINE_MAX_CHARS, unbounded if neither is set.
    #[clap(short = 'c', long = "max-chars", help = "characters per row")]
    max_chars: Option<usize>,

    /// Maximum number of rows.
    /// Falls back to ROWLINE_MAX_ROWS, unbounded if neither is set.
    #[clap(short = 'r', long = "max-rows", help = "maximum row count")]
    max_rows: Option<usize>,

    /// Write tracing output to this file instead of stderr
    #[clap(long = "log-file", help = "log file path")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    max_chars: Option<usize>,
    max_rows: Option<usize>,
    log_file: Option<PathBuf>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            max_chars: args.max_chars,
            max_rows: args.max_rows,
            log_file: args.log_file,
        }
    }

    pub fn max_chars(&self) -> Option<usize> {
        self.max_chars
    }

    pub fn max_rows(&self) -> Option<usize> {
        self.max_rows
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Resolve the effective row limits, consulting the environment for unset flags
    pub fn row_limits(&self) -> Result<RowLimits, ConfigError> {
        RowLimits::resolve(self.max_chars, self.max_rows)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_long_flags() {
        let args = CommandLineArgs::parse_from(["program", "--max-chars", "5", "--max-rows", "3"]);
        assert_eq!(args.max_chars(), Some(5));
        assert_eq!(args.max_rows(), Some(3));
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-c", "40", "-r", "10"]);
        assert_eq!(args.max_chars(), Some(40));
        assert_eq!(args.max_rows(), Some(10));
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert_eq!(args.max_chars(), None);
        assert_eq!(args.max_rows(), None);
        assert!(args.log_file().is_none());
    }

    #[test]
    fn test_parse_log_file() {
        let args = CommandLineArgs::parse_from(["program", "--log-file", "/tmp/rowline.log"]);
        assert_eq!(args.log_file(), Some(Path::new("/tmp/rowline.log")));
    }

    #[test]
    fn test_zero_capacity_fails_when_resolving_limits() {
        let args = CommandLineArgs::parse_from(["program", "--max-chars", "0"]);
        assert_eq!(args.row_limits(), Err(ConfigError::ZeroCapacity));
    }
}
