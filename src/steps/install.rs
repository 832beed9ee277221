//! The ensure-vcs-client step
//!
//! Installs or upgrades the git client through the platform's package
//! manager. On Ubuntu everything goes through apt under sudo; on macOS the
//! step bootstraps Homebrew first when it is missing, which touches the shell
//! profile and therefore reports a reload-needed outcome.

use std::path::PathBuf;
use std::process::Command;

use super::{command_succeeds, run_logged};
use crate::error::Result;
use crate::merge::{self, MergeOutcome};
use crate::probe::{OsName, SystemProfile};
use crate::runner::StepOutcome;

const BREW_BOOTSTRAP_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

pub fn ensure_vcs_client(profile: &SystemProfile) -> Result<StepOutcome> {
    match profile.os {
        OsName::Ubuntu => ensure_on_ubuntu(profile),
        OsName::Macos => ensure_on_macos(profile),
    }
}

fn ensure_on_ubuntu(profile: &SystemProfile) -> Result<StepOutcome> {
    run_logged(apt(&["update"]))?;
    if profile.virtualized_guest {
        tracing::info!("virtualized guest, skipping full system upgrade");
    } else {
        run_logged(apt(&["-y", "upgrade"]))?;
    }
    run_logged(apt(&["-y", "install", "git"]))?;
    run_logged(apt(&["-y", "autoclean"]))?;
    Ok(StepOutcome::Success)
}

/// apt-get under sudo, kept non-interactive via the frontend override
fn apt(args: &[&str]) -> Command {
    let mut cmd = Command::new("sudo");
    cmd.arg("DEBIAN_FRONTEND=noninteractive").arg("apt-get");
    cmd.args(args);
    cmd
}

fn ensure_on_macos(profile: &SystemProfile) -> Result<StepOutcome> {
    let mut profile_touched = false;

    let brew = match which::which("brew") {
        Ok(path) => path,
        Err(_) => {
            bootstrap_homebrew()?;
            let prefix = brew_prefix(&profile.arch);
            let shellenv = shellenv_line(prefix);
            if merge::append_line_if_absent(&profile.profile_path, &shellenv)?
                == MergeOutcome::Changed
            {
                tracing::info!(path = %profile.profile_path.display(), "added brew shellenv to profile");
                profile_touched = true;
            }
            PathBuf::from(prefix).join("bin/brew")
        }
    };

    let mut probe = Command::new(&brew);
    probe.args(["list", "--versions", "git"]);
    if command_succeeds(probe) {
        let mut upgrade = Command::new(&brew);
        upgrade.args(["upgrade", "git"]);
        run_logged(upgrade)?;
    } else {
        let mut install = Command::new(&brew);
        install.args(["install", "git"]);
        run_logged(install)?;
    }

    Ok(if profile_touched {
        StepOutcome::SuccessNeedsReload
    } else {
        StepOutcome::Success
    })
}

/// One-time Homebrew bootstrap via the official install script
fn bootstrap_homebrew() -> Result<()> {
    let mut cmd = Command::new("/bin/bash");
    cmd.arg("-c")
        .arg(format!("curl -fsSL {BREW_BOOTSTRAP_URL} | /bin/bash"))
        .env("NONINTERACTIVE", "1");
    run_logged(cmd)
}

fn brew_prefix(arch: &str) -> &'static str {
    if arch == "arm64" {
        "/opt/homebrew"
    } else {
        "/usr/local"
    }
}

fn shellenv_line(prefix: &str) -> String {
    format!("eval \"$({prefix}/bin/brew shellenv)\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brew_prefix_by_arch() {
        assert_eq!(brew_prefix("arm64"), "/opt/homebrew");
        assert_eq!(brew_prefix("x86_64"), "/usr/local");
    }

    #[test]
    fn test_shellenv_line() {
        assert_eq!(
            shellenv_line("/opt/homebrew"),
            "eval \"$(/opt/homebrew/bin/brew shellenv)\""
        );
    }

    #[test]
    fn test_apt_runs_under_sudo_noninteractively() {
        let cmd = apt(&["-y", "install", "git"]);
        assert_eq!(
            super::super::render(&cmd),
            "sudo DEBIAN_FRONTEND=noninteractive apt-get -y install git"
        );
    }
}
