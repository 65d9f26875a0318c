use thiserror::Error;

pub const DEFAULT_ATOM_RADIUS: f32 = 1.01;
pub const DEFAULT_LEASH_LENGTH: f32 = 1.51;
pub const DEFAULT_DELTA: f32 = 0.11;
pub const DEFAULT_ETA: f32 = 0.21;
pub const DEFAULT_SKIPPED: usize = 1;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Parameter '{name}' must be positive and finite (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("Parameter '{name}' must be finite (got {value})")]
    NonFinite { name: &'static str, value: f32 },
}

/// Physical parameters of the tube model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnotParameters {
    /// Tube radius. Two atoms overlap when closer than twice this value.
    pub atom_radius: f32,
    /// Maximum allowed distance between chain-adjacent atoms.
    pub leash_length: f32,
    /// Extra gap left between two atoms after an overlap is corrected.
    pub delta: f32,
    /// Slack added to the overlap distance when deciding who is a neighbor.
    pub eta: f32,
    /// Same-strand atoms closer than this many indices are never checked for overlap.
    pub skipped: usize,
}

impl Default for KnotParameters {
    fn default() -> Self {
        Self {
            atom_radius: DEFAULT_ATOM_RADIUS,
            leash_length: DEFAULT_LEASH_LENGTH,
            delta: DEFAULT_DELTA,
            eta: DEFAULT_ETA,
            skipped: DEFAULT_SKIPPED,
        }
    }
}

impl KnotParameters {
    /// Minimum allowed center-to-center distance of non-exempt atoms.
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        2.0 * self.atom_radius
    }

    /// Distance below which two atoms are recorded as neighbors.
    #[inline]
    pub fn neighbor_cutoff(&self) -> f32 {
        2.0 * self.atom_radius + self.eta
    }

    /// Separation an overlapping pair is pushed to.
    #[inline]
    pub fn corrected_separation(&self) -> f32 {
        2.0 * self.atom_radius + self.delta
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        for (name, value) in [
            ("atom_radius", self.atom_radius),
            ("leash_length", self.leash_length),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::NonPositive { name, value });
            }
        }
        for (name, value) in [("delta", self.delta), ("eta", self.eta)] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
        }
        Ok(())
    }
}
