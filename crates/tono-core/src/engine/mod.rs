//! # Engine Module
//!
//! The stateful side of the library: a [`model::KnotModel`] owning a knot
//! plus everything derived from it, and the relaxation procedures it
//! sequences.
//!
//! ## Architecture
//!
//! - **Model** ([`model`]) - the live knot, iteration counter and the
//!   `iterate()` step
//! - **Neighbor Index** ([`neighbors`]) - per-atom proximity lists bounding overlap checks
//! - **Traversal** ([`traversal`]) - random or pinned visiting orders for strand passes
//! - **Tasks** ([`tasks`]) - overlap removal, leash control, force
//!   integration and the two resamplers
//! - **Configuration** ([`config`]) - scheduling knobs of the relaxation loop
//! - **Snapshots** ([`snapshot`]) - immutable copies handed to observers
//! - **Progress Monitoring** ([`progress`]) - callback-based progress events
//! - **Error Handling** ([`error`]) - engine-level errors

pub mod config;
pub mod error;
pub mod model;
pub mod neighbors;
pub mod progress;
pub mod snapshot;
pub mod tasks;
pub mod traversal;
