use crate::core::models::knot::Knot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// A single-writer, many-reader slot holding the latest published knot.
///
/// The relaxation loop publishes an immutable copy between `iterate()`
/// calls; observers clone the `Arc` and never see a half-corrected state.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    latest: RwLock<Option<Arc<Knot>>>,
    generation: AtomicU64,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, knot: Arc<Knot>) {
        let mut slot = match self.latest.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(knot);
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// The most recently published knot, if any.
    pub fn latest(&self) -> Option<Arc<Knot>> {
        match self.latest.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of snapshots published so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
