//! # Core Module
//!
//! The stateless foundation of TONO: the data model of a knotted tube, the
//! line-oriented text layout used to persist it, and small geometry helpers.
//!
//! ## Architecture
//!
//! - **Tube Representation** ([`models`]) - Atoms, strands, knots and their parameters
//! - **File I/O** ([`io`]) - Reading and writing the tab-separated knot layout
//! - **Geometry** ([`utils`]) - Distance and displacement helpers shared by the engine
//!
//! Nothing here mutates a knot on its own; relaxation lives in [`crate::engine`].

pub mod io;
pub mod models;
pub mod utils;
