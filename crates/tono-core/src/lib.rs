//! # TONO Core Library
//!
//! A knot-tightening relaxation engine. A knot is a tube of fixed radius,
//! discretized into chains of hard spheres ("atoms"). Each relaxation step
//! pushes apart overlapping atoms, pulls together adjacent atoms that drifted
//! farther than the leash length, and moves every atom by its force
//! accumulator. Repeated, these steps let a loose knot settle into a tight
//! configuration.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `Strand`,
//!   `Knot`, `KnotParameters`), the tab-separated persisted layout and
//!   geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** `KnotModel` and the procedures it runs:
//!   neighbor indexing, overlap removal, leash control, force integration,
//!   interpolation and rethreading.
//!
//! - **[`workflows`]: The Public API.** The caller-side relaxation loop with
//!   cancellation, progress reporting and snapshot publishing.

pub mod core;
pub mod engine;
pub mod workflows;
