//! # Core Models Module
//!
//! Plain data types describing a knotted tube: the spheres ("atoms") that make
//! up the rope, the open chains ("strands") they form, and the knot that owns
//! the strands together with its physical parameters.
//!
//! ## Key Components
//!
//! - [`atom`] - A sphere center with a pending force accumulator
//! - [`strand`] - An open, ordered chain of atoms
//! - [`knot`] - All strands plus the [`parameters::KnotParameters`]
//! - [`ids`] - Stable `(strand, atom)` handles used by the neighbor index
//!
//! These types carry no relaxation logic; the [`crate::engine`] layer mutates
//! them.

pub mod atom;
pub mod ids;
pub mod knot;
pub mod parameters;
pub mod strand;
