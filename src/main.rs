//! # rowline Main Entry Point
//!
//! Numbered, row-bounded multiline input in the terminal.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rowline::cmd_args::CommandLineArgs;
use rowline::config::{self, DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV_VAR};
use rowline::AppController;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.log_file())?;

    let limits = cmd_args.row_limits()?;
    let mut app = AppController::new(limits)?;
    app.run()
}

/// Pick the tracing filter, or `None` to leave logging off.
///
/// stderr shares the screen with the editor, so without a log file logs
/// are only written when a level was asked for explicitly.
fn log_filter(has_log_file: bool, configured: Option<String>) -> Option<String> {
    match (has_log_file, configured) {
        (_, Some(filter)) => Some(filter),
        (true, None) => Some(DEFAULT_LOG_LEVEL.to_string()),
        (false, None) => None,
    }
}

fn init_tracing_subscriber(log_file: Option<&Path>) -> Result<()> {
    let Some(filter) = log_filter(log_file.is_some(), config::get_log_filter()) else {
        return Ok(());
    };

    let env_filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("invalid {LOG_LEVEL_ENV_VAR} value '{filter}'"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::rfc_3339());

    let installed = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
