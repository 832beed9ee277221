//! Platform installer steps
//!
//! Both steps branch on the probed OS and share the same contract: they return
//! a [`crate::runner::StepOutcome`] on success and let errors surface to the
//! step runner, which converts them into a failed outcome. Collaborator
//! commands run non-interactively with their output captured into the run log.

pub mod configure;
pub mod install;

pub use configure::apply_configuration;
pub use install::ensure_vcs_client;

use std::process::{Command, Stdio};

use crate::error::{DevprepError, Result};

/// Run a collaborator command, logging its output; non-zero exit is an error
fn run_logged(mut cmd: Command) -> Result<()> {
    let rendered = render(&cmd);
    tracing::info!(command = %rendered, "running");

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| DevprepError::CommandLaunchFailed {
            command: rendered.clone(),
            reason: e.to_string(),
        })?;

    if !output.stdout.is_empty() {
        tracing::debug!(command = %rendered, stdout = %String::from_utf8_lossy(&output.stdout));
    }
    if !output.stderr.is_empty() {
        tracing::debug!(command = %rendered, stderr = %String::from_utf8_lossy(&output.stderr));
    }

    if !output.status.success() {
        return Err(DevprepError::CommandFailed {
            command: rendered,
            status: output.status.to_string(),
        });
    }
    Ok(())
}

/// Probe a command's exit status without treating failure as an error
fn command_succeeds(mut cmd: Command) -> bool {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn render(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_program_and_args() {
        let mut cmd = Command::new("sudo");
        cmd.args(["apt-get", "-y", "install", "git"]);
        assert_eq!(render(&cmd), "sudo apt-get -y install git");
    }

    #[test]
    fn test_command_succeeds_reports_exit_status() {
        assert!(command_succeeds(Command::new("true")));
        assert!(!command_succeeds(Command::new("false")));
        assert!(!command_succeeds(Command::new(
            "devprep-no-such-binary-anywhere"
        )));
    }

    #[test]
    fn test_run_logged_maps_nonzero_exit() {
        let result = run_logged(Command::new("false"));
        assert!(matches!(result, Err(DevprepError::CommandFailed { .. })));
    }

    #[test]
    fn test_run_logged_maps_missing_binary() {
        let result = run_logged(Command::new("devprep-no-such-binary-anywhere"));
        assert!(matches!(
            result,
            Err(DevprepError::CommandLaunchFailed { .. })
        ));
    }
}
