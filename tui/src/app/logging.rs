use std::{env, fs::OpenOptions};

use anyhow::{Context, Result};
use env_logger::{Env, Target};

const DEFAULT_LOG_FILE: &str = "predictor.log";
const ENV_LOG_FILE: &str = "PREDICTOR_LOG_FILE";

/// Routes `log` records to a file; the terminal belongs to the UI.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn init() -> Result<()> {
    let path = env::var(ENV_LOG_FILE).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file '{path}'"))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
