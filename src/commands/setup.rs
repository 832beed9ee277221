//! Setup command: the end-to-end bootstrap flow
//!
//! Preflight (probe, elevation) happens before any mutation and is fatal.
//! The two installer steps run strictly in sequence; a failed step is folded
//! into the run summary and the remaining steps still execute. The summary is
//! a plain local value, alive only for the duration of this function.

use std::path::Path;

use console::Style;

use crate::cli::Cli;
use crate::collect;
use crate::elevation;
use crate::error::Result;
use crate::logging;
use crate::probe;
use crate::runner::{self, RunSummary};
use crate::steps;

pub fn run(cli: &Cli) -> Result<()> {
    let log_path = logging::init(cli.verbose)?;

    let profile = probe::probe()?;
    if let Ok(json) = serde_json::to_string(&profile) {
        tracing::info!(profile = %json, "probed environment");
    }
    println!(
        "{} {} {} ({}), {} shell, profile {}",
        Style::new().bold().apply_to("Detected:"),
        profile.os,
        profile.os_version,
        profile.arch,
        profile.shell,
        profile.profile_path.display()
    );

    elevation::resolve_elevation(&profile)?;
    let operator = collect::collect(&profile)?;

    let mut summary = RunSummary::default();

    let step_profile = profile.clone();
    let outcome = runner::run_step("Ensuring version control client", move || {
        steps::ensure_vcs_client(&step_profile)
    });
    summary.record(&outcome);

    let step_profile = profile.clone();
    let step_operator = operator.clone();
    let host = cli.host.clone();
    let outcome = runner::run_step("Applying configuration", move || {
        steps::apply_configuration(&step_profile, &step_operator, &host)
    });
    summary.record(&outcome);

    report(&summary, &log_path);

    if summary.any_step_failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Single consolidated completion message after all steps have resolved
fn report(summary: &RunSummary, log_path: &Path) {
    println!();
    if summary.any_step_failed {
        println!(
            "{}",
            Style::new()
                .red()
                .bold()
                .apply_to("Setup finished with errors.")
        );
        println!("  See the log for details: {}", log_path.display());
    } else {
        println!("{}", Style::new().green().bold().apply_to("Setup complete."));
    }
    if summary.environment_updated {
        println!("  Restart your terminal or run `exec $SHELL -l` to pick up environment changes.");
    }
    if summary.followup_needed {
        println!(
            "  Credential configuration still needs to be finished by hand; see {}.",
            log_path.display()
        );
    }
}
