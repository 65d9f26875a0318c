//! The individual relaxation and resampling procedures.
//!
//! Each task is a free function over the strand storage; [`KnotModel`](super::model::KnotModel)
//! sequences them and owns the state they share (neighbor index, traversal policy).

pub mod force_integration;
pub mod interpolate;
pub mod leash_control;
pub mod overlap_removal;
pub mod rethread;
