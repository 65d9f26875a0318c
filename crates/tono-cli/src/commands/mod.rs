pub mod info;
pub mod relax;
pub mod resample;

use crate::error::{CliError, Result};
use std::path::Path;
use tono::engine::model::KnotModel;
use tracing::info;

fn load_model(path: &Path) -> Result<KnotModel> {
    info!("Loading knot from {:?}", path);
    KnotModel::load_from_path(path).map_err(|e| CliError::from_engine_at(path, e))
}

fn save_model(model: &KnotModel, path: &Path) -> Result<()> {
    model
        .save_to_path(path)
        .map_err(|e| CliError::from_engine_at(path, e))
}

/// Interpolates `times` times, then optionally rethreads, reporting atom counts.
fn apply_resampling(model: &mut KnotModel, times: u32, rethread: bool) {
    for _ in 0..times {
        model.interpolate();
    }
    if rethread {
        model.rethread();
    }
    if times > 0 || rethread {
        println!(
            "Resampled to {} atom(s) across {} strand(s).",
            model.total_atoms(),
            model.strand_count()
        );
    }
}
