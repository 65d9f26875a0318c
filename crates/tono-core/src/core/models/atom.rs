use nalgebra::{Point3, Vector3};

/// A single sphere of the knotted tube.
///
/// An atom carries its physical position and a pending force accumulator.
/// The accumulator is written by whatever drives directed motion (a "motor"
/// acting on the rope); the relaxation engine only reads it during force
/// integration and never clears it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// The 3D coordinates of the sphere center.
    pub position: Point3<f32>,
    /// The displacement applied to this atom on every force-integration step.
    pub force: Vector3<f32>,
}

impl Atom {
    /// Creates an atom at rest (zero force) at the given position.
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            force: Vector3::zeros(),
        }
    }

    /// Creates an atom with an explicit force accumulator.
    pub fn with_force(position: Point3<f32>, force: Vector3<f32>) -> Self {
        Self { position, force }
    }

    /// Builds an atom from the six persisted fields `x, y, z, fx, fy, fz`.
    pub fn from_fields(fields: [f32; 6]) -> Self {
        let [x, y, z, fx, fy, fz] = fields;
        Self {
            position: Point3::new(x, y, z),
            force: Vector3::new(fx, fy, fz),
        }
    }

    /// Returns the six persisted fields `x, y, z, fx, fy, fz`.
    pub fn fields(&self) -> [f32; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.force.x,
            self.force.y,
            self.force.z,
        ]
    }

    /// Componentwise mean of two atoms, both position and force.
    pub fn midpoint(a: &Atom, b: &Atom) -> Self {
        Self {
            position: nalgebra::center(&a.position, &b.position),
            force: (a.force + b.force) / 2.0,
        }
    }
}
