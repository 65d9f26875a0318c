use crate::engine::config::ConfigError;
use crate::engine::error::EngineError;
use crate::engine::model::KnotModel;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::snapshot::SnapshotCell;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, instrument, warn};

/// Bounds of a relaxation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelaxSettings {
    /// Stop after this many iterations. `None` runs until cancelled.
    pub max_iterations: Option<u64>,
    /// Publish a snapshot every this many iterations. The final state is
    /// always published when a [`SnapshotCell`] is given.
    pub publish_every: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxSummary {
    pub iterations_run: u64,
    pub neighbor_rebuilds: u64,
    /// Most overlap passes any single iteration needed.
    pub max_overlap_passes: usize,
    /// Iterations whose overlap removal hit the configured pass cap.
    pub unconverged_iterations: u64,
    pub cancelled: bool,
    pub final_leash_violation: f32,
}

/// Drives `model.iterate()` until the iteration cap is reached or
/// `keep_running` is cleared.
///
/// The flag is read only between iterations, so a published snapshot and the
/// model left behind always reflect a whole number of completed iterations.
#[instrument(skip_all, name = "relax_workflow")]
pub fn run(
    model: &mut KnotModel,
    settings: &RelaxSettings,
    reporter: &ProgressReporter,
    keep_running: &AtomicBool,
    snapshots: Option<&SnapshotCell>,
) -> Result<RelaxSummary, EngineError> {
    if settings.publish_every == Some(0) {
        return Err(ConfigError::Zero {
            name: "publish_every",
        }
        .into());
    }

    reporter.report(Progress::PhaseStart { name: "Relaxation" });
    info!(
        strands = model.strand_count(),
        atoms = model.total_atoms(),
        max_iterations = ?settings.max_iterations,
        "Starting relaxation."
    );
    if let Some(total) = settings.max_iterations {
        reporter.report(Progress::TaskStart { total_steps: total });
    }

    let mut summary = RelaxSummary {
        iterations_run: 0,
        neighbor_rebuilds: 0,
        max_overlap_passes: 0,
        unconverged_iterations: 0,
        cancelled: false,
        final_leash_violation: 0.0,
    };

    loop {
        if settings
            .max_iterations
            .is_some_and(|max| summary.iterations_run >= max)
        {
            break;
        }
        if !keep_running.load(Ordering::Acquire) {
            summary.cancelled = true;
            break;
        }

        let report = model.iterate();
        summary.iterations_run += 1;
        summary.neighbor_rebuilds += u64::from(report.neighbors_rebuilt);
        summary.max_overlap_passes = summary.max_overlap_passes.max(report.overlap_passes);
        if !report.converged {
            summary.unconverged_iterations += 1;
        }
        if report.neighbors_rebuilt && reporter.is_observed() {
            reporter.report(Progress::StatusUpdate {
                text: format!("Iteration {}", report.iteration + 1),
            });
        }

        if let (Some(cell), Some(every)) = (snapshots, settings.publish_every) {
            if summary.iterations_run % every == 0 {
                cell.publish(model.publish());
            }
        }
        if settings.max_iterations.is_some() {
            reporter.report(Progress::TaskIncrement);
        }
    }

    if let Some(cell) = snapshots {
        cell.publish(model.publish());
    }
    if settings.max_iterations.is_some() {
        reporter.report(Progress::TaskFinish);
    }

    summary.final_leash_violation = model.max_leash_violation();
    if summary.cancelled {
        reporter.report(Progress::Message(format!(
            "Relaxation cancelled after {} iteration(s).",
            summary.iterations_run
        )));
    }
    if summary.unconverged_iterations > 0 {
        warn!(
            iterations = summary.unconverged_iterations,
            "Some iterations ended with overlaps remaining."
        );
    }
    reporter.report(Progress::PhaseFinish);

    info!(
        iterations = summary.iterations_run,
        rebuilds = summary.neighbor_rebuilds,
        cancelled = summary.cancelled,
        leash_violation = summary.final_leash_violation,
        "Relaxation complete."
    );
    Ok(summary)
}
