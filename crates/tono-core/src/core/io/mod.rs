//! Reading and writing persisted knots.
//!
//! The only format is the line-oriented, tab-separated layout in
//! [`knot_text`]: a parameter line, a comment line, then one atom per line
//! with blank lines separating strands.

pub mod knot_text;
pub mod traits;
