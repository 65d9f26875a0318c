use crate::cli::{ParameterOverrides, RelaxArgs};
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tono::core::models::parameters::KnotParameters;
use tono::engine::config::{RelaxationConfig, RelaxationConfigBuilder};
use tracing::debug;

const DEFAULT_ITERATIONS: u64 = 1_000;

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
struct PartialKnotConfig {
    #[serde(rename = "atom-radius")]
    atom_radius: Option<f32>,
    #[serde(rename = "leash-length")]
    leash_length: Option<f32>,
    delta: Option<f32>,
    eta: Option<f32>,
    skipped: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialRelaxationConfig {
    iterations: Option<u64>,
    #[serde(rename = "neighbor-rebuild-interval")]
    neighbor_rebuild_interval: Option<u64>,
    #[serde(rename = "max-overlap-passes")]
    max_overlap_passes: Option<usize>,
    seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialResampleConfig {
    interpolate: Option<u32>,
    rethread: Option<bool>,
}

/// The optional TOML file of `tono relax`. Every key may be omitted.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRelaxConfig {
    knot: Option<PartialKnotConfig>,
    relaxation: Option<PartialRelaxationConfig>,
    resample: Option<PartialResampleConfig>,
}

/// Everything `tono relax` needs after merging file header, TOML file and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxPlan {
    pub parameters: KnotParameters,
    pub relaxation: RelaxationConfig,
    pub iterations: u64,
    pub seed: Option<u64>,
    pub interpolate: u32,
    pub rethread: bool,
}

impl PartialRelaxConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Merges in precedence order: `base` (the knot file header) < TOML file
    /// < command-line flags.
    pub fn merge_with_cli(mut self, args: &RelaxArgs, base: KnotParameters) -> Result<RelaxPlan> {
        self.apply_set_values(&args.set_values)?;

        let knot_config = self.knot.take().unwrap_or_default();
        let relax_config = self.relaxation.take().unwrap_or_default();
        let resample_config = self.resample.take().unwrap_or_default();

        let parameters = merge_parameters(base, knot_config, args.parameters)?;

        let mut builder = RelaxationConfigBuilder::new();
        if let Some(interval) = args
            .neighbor_rebuild_interval
            .or(relax_config.neighbor_rebuild_interval)
        {
            builder = builder.neighbor_rebuild_interval(interval);
        }
        if let Some(passes) = args.max_overlap_passes.or(relax_config.max_overlap_passes) {
            builder = builder.max_overlap_passes(passes);
        }
        let relaxation = builder.build().map_err(|e| CliError::Config(e.to_string()))?;

        Ok(RelaxPlan {
            parameters,
            relaxation,
            iterations: args
                .iterations
                .or(relax_config.iterations)
                .unwrap_or(DEFAULT_ITERATIONS),
            seed: args.seed.or(relax_config.seed),
            interpolate: args
                .interpolate
                .or(resample_config.interpolate)
                .unwrap_or(0),
            rethread: args.rethread || resample_config.rethread.unwrap_or(false),
        })
    }

    fn knot_section(&mut self) -> &mut PartialKnotConfig {
        self.knot.get_or_insert_with(Default::default)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "knot.atom-radius" => {
                    self.knot_section().atom_radius = Some(parse_value(key, value_str)?)
                }
                "knot.leash-length" => {
                    self.knot_section().leash_length = Some(parse_value(key, value_str)?)
                }
                "knot.delta" => self.knot_section().delta = Some(parse_value(key, value_str)?),
                "knot.eta" => self.knot_section().eta = Some(parse_value(key, value_str)?),
                "knot.skipped" => {
                    self.knot_section().skipped = Some(parse_value(key, value_str)?)
                }
                "relaxation.iterations" => {
                    self.relaxation
                        .get_or_insert_with(Default::default)
                        .iterations = Some(parse_value(key, value_str)?);
                }
                "relaxation.neighbor-rebuild-interval" => {
                    self.relaxation
                        .get_or_insert_with(Default::default)
                        .neighbor_rebuild_interval = Some(parse_value(key, value_str)?);
                }
                "relaxation.max-overlap-passes" => {
                    self.relaxation
                        .get_or_insert_with(Default::default)
                        .max_overlap_passes = Some(parse_value(key, value_str)?);
                }
                "relaxation.seed" => {
                    self.relaxation
                        .get_or_insert_with(Default::default)
                        .seed = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Applies flag overrides to header parameters. Used by commands without a config file.
pub fn apply_overrides(
    base: KnotParameters,
    overrides: ParameterOverrides,
) -> Result<KnotParameters> {
    merge_parameters(base, PartialKnotConfig::default(), overrides)
}

fn merge_parameters(
    base: KnotParameters,
    file: PartialKnotConfig,
    cli: ParameterOverrides,
) -> Result<KnotParameters> {
    let parameters = KnotParameters {
        atom_radius: cli
            .atom_radius
            .or(file.atom_radius)
            .unwrap_or(base.atom_radius),
        leash_length: cli
            .leash_length
            .or(file.leash_length)
            .unwrap_or(base.leash_length),
        delta: cli.delta.or(file.delta).unwrap_or(base.delta),
        eta: cli.eta.or(file.eta).unwrap_or(base.eta),
        skipped: cli.skipped.or(file.skipped).unwrap_or(base.skipped),
    };
    parameters
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(parameters)
}

fn parse_value<T: std::str::FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value_str)))
}
