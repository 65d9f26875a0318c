use thiserror::Error;

/// How many `iterate()` calls share one neighbor index before it is rebuilt.
pub const DEFAULT_NEIGHBOR_REBUILD_INTERVAL: u64 = 200;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Parameter '{name}' must be at least 1")]
    Zero { name: &'static str },
}

/// Scheduling knobs of the relaxation loop, independent of the knot's physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaxationConfig {
    /// Rebuild the neighbor index whenever the iteration count is a multiple of this.
    pub neighbor_rebuild_interval: u64,
    /// Upper bound on overlap-removal passes per iteration. `None` runs to the fixed point.
    pub max_overlap_passes: Option<usize>,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            neighbor_rebuild_interval: DEFAULT_NEIGHBOR_REBUILD_INTERVAL,
            max_overlap_passes: None,
        }
    }
}

#[derive(Default)]
pub struct RelaxationConfigBuilder {
    neighbor_rebuild_interval: Option<u64>,
    max_overlap_passes: Option<usize>,
}

impl RelaxationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn neighbor_rebuild_interval(mut self, interval: u64) -> Self {
        self.neighbor_rebuild_interval = Some(interval);
        self
    }
    pub fn max_overlap_passes(mut self, passes: usize) -> Self {
        self.max_overlap_passes = Some(passes);
        self
    }

    pub fn build(self) -> Result<RelaxationConfig, ConfigError> {
        let neighbor_rebuild_interval = self
            .neighbor_rebuild_interval
            .unwrap_or(DEFAULT_NEIGHBOR_REBUILD_INTERVAL);
        if neighbor_rebuild_interval == 0 {
            return Err(ConfigError::Zero {
                name: "neighbor_rebuild_interval",
            });
        }
        if self.max_overlap_passes == Some(0) {
            return Err(ConfigError::Zero {
                name: "max_overlap_passes",
            });
        }
        Ok(RelaxationConfig {
            neighbor_rebuild_interval,
            max_overlap_passes: self.max_overlap_passes,
        })
    }
}
