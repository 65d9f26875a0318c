use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "TONO contributors",
    version,
    about = "TONO CLI - Headless knot tightening: relax, resample and inspect tab-separated knot layouts.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to rebuild neighbor lists.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a knot, optionally resample it, run relaxation iterations and save the result.
    Relax(RelaxArgs),
    /// Interpolate and/or rethread a knot without relaxing it.
    Resample(ResampleArgs),
    /// Print strand counts, parameters and constraint diagnostics of a knot file.
    Info(InfoArgs),
}

/// Overrides for the physical parameters stored in the knot file header.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ParameterOverrides {
    /// Override the tube (atom) radius.
    #[arg(long, value_name = "FLOAT")]
    pub atom_radius: Option<f32>,

    /// Override the maximum distance between adjacent atoms.
    #[arg(long, value_name = "FLOAT")]
    pub leash_length: Option<f32>,

    /// Override the slack added when separating overlapping atoms.
    #[arg(long, value_name = "FLOAT")]
    pub delta: Option<f32>,

    /// Override the slack added to the neighbor cutoff.
    #[arg(long, value_name = "FLOAT")]
    pub eta: Option<f32>,

    /// Override how many same-strand index steps are exempt from overlap checks.
    #[arg(long, value_name = "INT")]
    pub skipped: Option<usize>,
}

/// Arguments for the `relax` subcommand.
#[derive(Args, Debug)]
pub struct RelaxArgs {
    // --- Core Arguments ---
    /// Path to the input knot layout file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the relaxed knot layout file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Relaxation Overrides ---
    /// Number of relaxation iterations to run.
    #[arg(short = 'n', long, value_name = "INT")]
    pub iterations: Option<u64>,

    /// Rebuild neighbor lists every this many iterations.
    #[arg(long, value_name = "INT")]
    pub neighbor_rebuild_interval: Option<u64>,

    /// Cap on overlap-removal passes per iteration (unbounded by default).
    #[arg(long, value_name = "INT")]
    pub max_overlap_passes: Option<usize>,

    /// Seed for the per-pass traversal order, making runs reproducible.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    // --- Resampling before relaxation ---
    /// Interpolate the knot this many times before relaxing (each doubles resolution).
    #[arg(long, value_name = "N")]
    pub interpolate: Option<u32>,

    /// Rethread the knot at leash-length spacing before relaxing.
    #[arg(long)]
    pub rethread: bool,

    #[command(flatten)]
    pub parameters: ParameterOverrides,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S relaxation.iterations=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `resample` subcommand.
#[derive(Args, Debug)]
pub struct ResampleArgs {
    /// Path to the input knot layout file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the resampled knot layout file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Interpolate the knot this many times (each doubles resolution).
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub interpolate: u32,

    /// Rethread the knot at leash-length spacing, after any interpolation.
    #[arg(long)]
    pub rethread: bool,

    #[command(flatten)]
    pub parameters: ParameterOverrides,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the knot layout file to inspect.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relax_arguments_parse_with_overrides() {
        let cli = Cli::parse_from([
            "tono",
            "-vv",
            "relax",
            "-i",
            "in.txt",
            "-o",
            "out.txt",
            "-n",
            "50",
            "--interpolate",
            "2",
            "--rethread",
            "--leash-length",
            "1.2",
            "-S",
            "knot.delta=0.2",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Relax(args) = cli.command else {
            panic!("Expected 'relax' subcommand");
        };
        assert_eq!(args.iterations, Some(50));
        assert_eq!(args.interpolate, Some(2));
        assert!(args.rethread);
        assert_eq!(args.parameters.leash_length, Some(1.2));
        assert_eq!(args.parameters.atom_radius, None);
        assert_eq!(args.set_values, vec!["knot.delta=0.2".to_string()]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["tono", "-q", "-v", "info", "knot.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn resample_defaults_to_no_interpolation() {
        let cli = Cli::parse_from(["tono", "resample", "-i", "a", "-o", "b", "--rethread"]);
        let Commands::Resample(args) = cli.command else {
            panic!("Expected 'resample' subcommand");
        };
        assert_eq!(args.interpolate, 0);
        assert!(args.rethread);
    }
}
