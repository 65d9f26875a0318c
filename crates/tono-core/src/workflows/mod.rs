//! # Workflows Module
//!
//! High-level entry points that drive a [`KnotModel`](crate::engine::model::KnotModel)
//! through a complete relaxation run.
//!
//! - **Relaxation Workflow** ([`relax`]) - repeated `iterate()` calls with
//!   cooperative cancellation, an iteration cap, progress events and
//!   periodic snapshot publishing.

pub mod relax;
