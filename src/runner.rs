//! Installer step execution
//!
//! Each step runs as a background unit of work while the calling thread keeps
//! a spinner alive. The step's result is mapped into a [`StepOutcome`] at this
//! boundary only; failures are recorded, never propagated, so a failed step
//! does not stop the steps after it.

use std::thread;
use std::time::Duration;

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;

/// Terminal state of one installer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    /// Succeeded, but the shell environment changed and needs a reload
    SuccessNeedsReload,
    /// Succeeded, but the operator still has manual configuration to do
    SuccessNeedsFollowup,
    Failed(String),
}

/// Aggregate of all executed steps, owned by the orchestrator
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub environment_updated: bool,
    pub followup_needed: bool,
    pub any_step_failed: bool,
}

impl RunSummary {
    /// Fold one step outcome into the summary; each terminal state sets at
    /// most one flag and never clears another step's flags.
    pub fn record(&mut self, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Success => {}
            StepOutcome::SuccessNeedsReload => self.environment_updated = true,
            StepOutcome::SuccessNeedsFollowup => self.followup_needed = true,
            StepOutcome::Failed(_) => self.any_step_failed = true,
        }
    }
}

/// Hides the terminal cursor for its lifetime; restored on drop, even when the
/// step's unit of work panics.
struct CursorGuard {
    term: Term,
}

impl CursorGuard {
    fn hide() -> Self {
        let term = Term::stdout();
        let _ = term.hide_cursor();
        Self { term }
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let _ = self.term.show_cursor();
    }
}

fn step_spinner(name: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(name.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Run one named step to its terminal state.
///
/// The thunk executes on a background thread; this thread renders the spinner
/// and blocks on the join. There is no retry, no cancellation and no timeout:
/// the step is resolved exactly once.
pub fn run_step<F>(name: &str, thunk: F) -> StepOutcome
where
    F: FnOnce() -> Result<StepOutcome> + Send + 'static,
{
    let _cursor = CursorGuard::hide();
    let pb = step_spinner(name);
    tracing::info!(step = name, "step started");

    let worker = thread::spawn(thunk);
    let outcome = match worker.join() {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => StepOutcome::Failed(e.to_string()),
        Err(_) => StepOutcome::Failed(format!("step '{name}' terminated abnormally")),
    };
    pb.finish_and_clear();

    match &outcome {
        StepOutcome::Failed(detail) => {
            tracing::error!(step = name, detail = %detail, "step failed");
            println!("{} {}", Style::new().red().bold().apply_to("✗"), name);
        }
        _ => {
            tracing::info!(step = name, outcome = ?outcome, "step finished");
            println!("{} {}", Style::new().green().bold().apply_to("✓"), name);
        }
    }

    outcome
}
