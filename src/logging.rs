//! Per-run log sink
//!
//! All step output and reconciliation decisions go to one append-only log
//! file, truncated at the start of each run. The terminal only ever shows the
//! spinner, prompts and the final report; diagnosis happens in the log.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;

use crate::error::Result;

/// Initialize the run log and return its path
pub fn init(verbose: bool) -> Result<PathBuf> {
    let path = log_path();
    let file = File::create(&path)?;
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    // try_init so a second call (e.g. in tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(path)
}

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("devprep.log")
}
