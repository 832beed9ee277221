//! Common test utilities for devprep integration tests

use assert_cmd::Command;

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn devprep_cmd() -> Command {
    Command::cargo_bin("devprep").unwrap()
}
