//! Configuration constants and row limits for rowline
//!
//! Limits are resolved once at start-up: command-line values win over
//! environment variables, and anything left unset is unbounded.

use std::num::NonZeroUsize;

use thiserror::Error;

/// Environment variable holding the per-row character capacity
pub const MAX_CHARS_ENV_VAR: &str = "ROWLINE_MAX_CHARS";

/// Environment variable holding the maximum number of rows
pub const MAX_ROWS_ENV_VAR: &str = "ROWLINE_MAX_ROWS";

/// Environment variable holding the tracing filter directive
pub const LOG_LEVEL_ENV_VAR: &str = "ROWLINE_LOG_LEVEL";

/// Filter used when a log file is given but no level is configured
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("maxCharCountInRow must be a positive integer, got 0")]
    ZeroCapacity,

    #[error("maxRowCount must be a positive integer, got 0")]
    ZeroRowLimit,

    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Capacity and row-count limits of a row buffer.
///
/// `None` means unbounded. Capacity is inclusive: a row holding exactly
/// `max_char_count_in_row` characters is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowLimits {
    max_char_count_in_row: Option<NonZeroUsize>,
    max_row_count: Option<NonZeroUsize>,
}

impl RowLimits {
    /// Build limits from raw values, rejecting zero.
    pub fn new(
        max_char_count_in_row: Option<usize>,
        max_row_count: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let max_char_count_in_row = match max_char_count_in_row {
            Some(value) => Some(NonZeroUsize::new(value).ok_or(ConfigError::ZeroCapacity)?),
            None => None,
        };
        let max_row_count = match max_row_count {
            Some(value) => Some(NonZeroUsize::new(value).ok_or(ConfigError::ZeroRowLimit)?),
            None => None,
        };

        Ok(Self {
            max_char_count_in_row,
            max_row_count,
        })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn max_char_count_in_row(&self) -> Option<usize> {
        self.max_char_count_in_row.map(NonZeroUsize::get)
    }

    pub fn max_row_count(&self) -> Option<usize> {
        self.max_row_count.map(NonZeroUsize::get)
    }

    /// Resolve limits from command-line values, falling back to the process environment
    pub fn resolve(
        cli_max_chars: Option<usize>,
        cli_max_rows: Option<usize>,
    ) -> Result<Self, ConfigError> {
        Self::resolve_with(cli_max_chars, cli_max_rows, |name| {
            std::env::var_os(name).and_then(|val| val.into_string().ok())
        })
    }

    /// Resolve limits using `lookup` in place of the process environment
    pub fn resolve_with<F>(
        cli_max_chars: Option<usize>,
        cli_max_rows: Option<usize>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_chars = match cli_max_chars {
            Some(value) => Some(value),
            None => parse_env_value(MAX_CHARS_ENV_VAR, lookup(MAX_CHARS_ENV_VAR))?,
        };
        let max_rows = match cli_max_rows {
            Some(value) => Some(value),
            None => parse_env_value(MAX_ROWS_ENV_VAR, lookup(MAX_ROWS_ENV_VAR))?,
        };

        Self::new(max_chars, max_rows)
    }
}

fn parse_env_value(name: &'static str, raw: Option<String>) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<usize>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            name,
            value: raw.clone(),
        })
}

/// Get the tracing filter, checking the environment variable first
pub fn get_log_filter() -> Option<String> {
    std::env::var_os(LOG_LEVEL_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.trim().is_empty())
}
