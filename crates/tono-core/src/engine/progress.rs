//! Callback-based progress events for long relaxation runs.

/// Events emitted by long-running engine work.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A bounded task begins, e.g. a fixed number of relaxation iterations.
    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// Short status text for the active task (e.g. the latest neighbor rebuild).
    StatusUpdate { text: String },
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Holds an optional observer; reporting without one is a no-op.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Whether anyone is listening. Lets callers skip building status text.
    #[inline]
    pub fn is_observed(&self) -> bool {
        self.callback.is_some()
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
