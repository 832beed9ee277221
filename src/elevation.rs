//! Privilege negotiation
//!
//! devprep must not itself run elevated; it validates that sudo is available
//! and establishes the session grant up front so privileged steps never stop
//! to prompt mid-flight. macOS needs no elevation at all (Homebrew runs as the
//! user), so the whole negotiation is a no-op there.

use std::process::{Command, Stdio};

use crate::error::{DevprepError, Result};
use crate::probe::{OsName, SystemProfile};

pub fn resolve_elevation(profile: &SystemProfile) -> Result<()> {
    if profile.os == OsName::Macos {
        tracing::info!("elevation not required on macOS");
        return Ok(());
    }

    if rustix::process::geteuid().is_root() {
        return Err(DevprepError::RunningElevated);
    }

    which::which("sudo").map_err(|_| DevprepError::ElevationUnavailable)?;

    if has_cached_grant() {
        tracing::info!("sudo session grant already cached");
        return Ok(());
    }

    println!("Elevated privileges are needed for package installation.");
    let status = Command::new("sudo")
        .arg("-v")
        .status()
        .map_err(|e| DevprepError::CommandLaunchFailed {
            command: "sudo -v".to_string(),
            reason: e.to_string(),
        })?;
    if !status.success() {
        return Err(DevprepError::ElevationDenied);
    }
    tracing::info!("sudo session grant established");
    Ok(())
}

/// Probe sudo's session cache without ever prompting
fn has_cached_grant() -> bool {
    Command::new("sudo")
        .args(["-n", "true"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
