//! Global git configuration access
//!
//! Thin wrapper over libgit2's config layer. Writes go through
//! [`GitConfig::set_if_changed`] so a value that already matches is never
//! rewritten, only logged as skipped.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::merge::MergeOutcome;

pub struct GitConfig {
    inner: git2::Config,
}

impl GitConfig {
    /// Open the user's global git configuration, creating the file on first
    /// write if it does not exist yet.
    pub fn open_global() -> Result<Self> {
        let path: PathBuf = match git2::Config::find_global() {
            Ok(path) => path,
            Err(_) => dirs::home_dir()
                .ok_or(crate::error::DevprepError::HomeNotFound)?
                .join(".gitconfig"),
        };
        Self::open_at(&path)
    }

    /// Open a specific config file (used by tests and by the global opener)
    pub fn open_at(path: &Path) -> Result<Self> {
        Ok(Self {
            inner: git2::Config::open(path)?,
        })
    }

    /// Current value of a key, or `None` when unset
    pub fn get(&mut self, key: &str) -> Option<String> {
        self.inner
            .snapshot()
            .ok()
            .and_then(|snap| snap.get_string(key).ok())
    }

    /// Write `value` under `key` only when it differs from the current value
    pub fn set_if_changed(&mut self, key: &str, value: &str) -> Result<MergeOutcome> {
        if self.get(key).as_deref() == Some(value) {
            tracing::info!(key, "git config already current, skipping");
            return Ok(MergeOutcome::Unchanged);
        }
        self.inner.set_str(key, value)?;
        tracing::info!(key, "git config updated");
        Ok(MergeOutcome::Changed)
    }
}
