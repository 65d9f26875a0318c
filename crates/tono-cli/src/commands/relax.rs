use super::{apply_resampling, load_model, save_model};
use crate::cli::RelaxArgs;
use crate::config::PartialRelaxConfig;
use crate::error::Result;
use crate::utils::progress::RelaxProgressBar;
use std::sync::atomic::AtomicBool;
use tono::engine::progress::ProgressReporter;
use tono::engine::traversal::TraversalPolicy;
use tono::workflows::relax::{self, RelaxSettings};
use tracing::{info, warn};

pub fn run(args: RelaxArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRelaxConfig::from_file(path)?,
        None => PartialRelaxConfig::default(),
    };

    let mut model = load_model(&args.input)?;

    info!("Merging configuration from knot header, file and CLI arguments...");
    let plan = partial_config.merge_with_cli(&args, *model.parameters())?;
    model.set_parameters(plan.parameters)?;
    model.set_config(plan.relaxation);
    if let Some(seed) = plan.seed {
        info!(seed, "Using a seeded traversal order.");
        model.set_traversal_policy(TraversalPolicy::seeded(seed));
    }

    apply_resampling(&mut model, plan.interpolate, plan.rethread);

    let progress_bar = RelaxProgressBar::new();
    let reporter = ProgressReporter::with_callback(progress_bar.get_callback());
    let settings = RelaxSettings {
        max_iterations: Some(plan.iterations),
        publish_every: None,
    };

    println!(
        "Relaxing {} atom(s) across {} strand(s) for {} iteration(s)...",
        model.total_atoms(),
        model.strand_count(),
        plan.iterations
    );
    // Runs are always bounded here, so nothing ever clears the stop flag.
    let summary = relax::run(&mut model, &settings, &reporter, &AtomicBool::new(true), None)?;

    if summary.unconverged_iterations > 0 {
        warn!(
            "{} iteration(s) stopped at the overlap pass cap.",
            summary.unconverged_iterations
        );
    }

    save_model(&model, &args.output)?;
    println!(
        "✓ Relaxed knot ({} iteration(s), max leash excess {:.4}) written to: {}",
        summary.iterations_run,
        summary.final_leash_violation,
        args.output.display()
    );
    Ok(())
}
