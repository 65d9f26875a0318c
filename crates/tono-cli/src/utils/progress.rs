use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use tono::engine::progress::{Progress, ProgressCallback};
use tracing::warn;

/// Terminal view of a `tono relax` run.
///
/// One bar spans the iteration budget. Its message names the phase and counts
/// neighbor rebuilds as the workflow reports them. A cancelled run leaves the
/// bar where it stopped instead of filling it.
#[derive(Clone)]
pub struct RelaxProgressBar {
    state: Arc<Mutex<BarState>>,
}

struct BarState {
    bar: ProgressBar,
    phase: &'static str,
    rebuilds: u64,
}

impl BarState {
    fn handle(&mut self, event: Progress) {
        match event {
            Progress::PhaseStart { name } => {
                self.phase = name;
                self.rebuilds = 0;
                self.bar.set_message(name);
            }
            Progress::TaskStart { total_steps } => {
                self.bar.set_length(total_steps);
                self.bar.set_position(0);
                self.bar.reset_elapsed();
            }
            Progress::TaskIncrement => self.bar.inc(1),
            Progress::StatusUpdate { text } => {
                self.rebuilds += 1;
                self.bar
                    .set_message(format!("{} | neighbors rebuilt at {}", self.phase, text));
            }
            Progress::TaskFinish => {
                if self.bar.length().is_some_and(|len| self.bar.position() < len) {
                    self.bar.abandon();
                } else {
                    self.bar.finish();
                }
            }
            Progress::Message(msg) => self.bar.println(format!("  {}", msg)),
            Progress::PhaseFinish => {
                let summary = format!(
                    "✓ {} finished after {} iteration(s), {} neighbor rebuild(s)",
                    self.phase,
                    self.bar.position(),
                    self.rebuilds
                );
                if self.bar.is_finished() {
                    self.bar.set_message(summary);
                } else {
                    self.bar.finish_with_message(summary);
                }
            }
        }
    }
}

impl RelaxProgressBar {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(Self::style());
        Self {
            state: Arc::new(Mutex::new(BarState {
                bar,
                phase: "Relaxation",
                rebuilds: 0,
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = Arc::clone(&self.state);
        Box::new(move |event: Progress| {
            let Ok(mut guard) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };
            guard.handle(event);
        })
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg} [{bar:40.cyan/blue}] {pos}/{len} iterations ({per_sec}, {eta})",
        )
        .expect("Failed to create relaxation bar template")
        .progress_chars("##-")
    }
}

impl Default for RelaxProgressBar {
    fn default() -> Self {
        Self::new()
    }
}
