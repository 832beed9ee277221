//! Error types and handling for devprep
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for devprep operations
#[derive(Error, Diagnostic, Debug)]
pub enum DevprepError {
    // Preflight errors: raised before any mutation, always fatal
    #[error("Unsupported platform: {os} {version}")]
    #[diagnostic(
        code(devprep::preflight::unsupported_platform),
        help("devprep supports Ubuntu 20.04 or newer and macOS 12 or newer")
    )]
    UnsupportedPlatform { os: String, version: String },

    #[error("Unsupported shell: {shell}")]
    #[diagnostic(
        code(devprep::preflight::unsupported_shell),
        help("devprep supports bash and zsh interactive shells")
    )]
    UnsupportedShell { shell: String },

    #[error("No shell profile file found for {shell}")]
    #[diagnostic(
        code(devprep::preflight::profile_not_found),
        help("Create one of the standard profile files (e.g. ~/.bashrc or ~/.zshrc) and re-run")
    )]
    ProfileNotFound { shell: String },

    #[error("Elevation mechanism not available: sudo not found on PATH")]
    #[diagnostic(
        code(devprep::preflight::elevation_unavailable),
        help("Install sudo or run the setup from an account that can use it")
    )]
    ElevationUnavailable,

    #[error("Refusing to run with elevated privileges")]
    #[diagnostic(
        code(devprep::preflight::running_elevated),
        help("Run devprep as a regular user; it requests elevation per step when needed")
    )]
    RunningElevated,

    #[error("Elevation grant was not established")]
    #[diagnostic(
        code(devprep::preflight::elevation_denied),
        help("The sudo password prompt was cancelled or rejected")
    )]
    ElevationDenied,

    #[error("Required tool not found: {tool}")]
    #[diagnostic(code(devprep::preflight::tool_missing))]
    RequiredToolMissing { tool: String },

    #[error("Could not determine home directory")]
    #[diagnostic(code(devprep::preflight::home_not_found))]
    HomeNotFound,

    // Step errors: caught at the step runner boundary, never fatal to the run
    #[error("Command failed with {status}: {command}")]
    #[diagnostic(code(devprep::step::command_failed))]
    CommandFailed { command: String, status: String },

    #[error("Failed to launch command: {command}")]
    #[diagnostic(code(devprep::step::command_launch_failed))]
    CommandLaunchFailed { command: String, reason: String },

    #[error("Git configuration operation failed: {message}")]
    #[diagnostic(code(devprep::step::git_config_failed))]
    GitConfigFailed { message: String },

    #[error("Failed to read {label} prompt")]
    #[diagnostic(code(devprep::prompt::read_failed))]
    PromptFailed { label: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(devprep::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(devprep::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for DevprepError {
    fn from(err: std::io::Error) -> Self {
        DevprepError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<git2::Error> for DevprepError {
    fn from(err: git2::Error) -> Self {
        DevprepError::GitConfigFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DevprepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_error() {
        let err = DevprepError::UnsupportedPlatform {
            os: "debian".to_string(),
            version: "12".to_string(),
        };
        assert!(err.to_string().contains("Unsupported platform"));
        assert!(err.to_string().contains("debian"));
    }

    #[test]
    fn test_unsupported_shell_error() {
        let err = DevprepError::UnsupportedShell {
            shell: "fish".to_string(),
        };
        assert!(err.to_string().contains("Unsupported shell"));
        assert!(err.to_string().contains("fish"));
    }

    #[test]
    fn test_command_failed_error() {
        let err = DevprepError::CommandFailed {
            command: "apt-get update".to_string(),
            status: "exit status: 100".to_string(),
        };
        assert!(err.to_string().contains("apt-get update"));
        assert!(err.to_string().contains("exit status: 100"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DevprepError = io_err.into();
        assert!(matches!(err, DevprepError::IoError { .. }));
    }

    #[test]
    fn test_git_error_conversion() {
        let git_err = git2::Error::from_str("config locked");
        let err: DevprepError = git_err.into();
        assert!(matches!(err, DevprepError::GitConfigFailed { .. }));
    }
}
