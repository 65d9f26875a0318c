use crate::core::models::atom::Atom;
use crate::core::models::strand::Strand;
use crate::core::utils::geometry;
use itertools::Itertools;
use tracing::{trace, warn};

/// Re-spaces one strand along its own polyline.
///
/// Walking from atom 0, a new atom (at rest) is emitted every `spacing` of
/// arc length. Leftover length carries across segment boundaries, zero-length
/// segments are skipped, and the tail shorter than `spacing` is not padded,
/// so the last original atom is generally not reproduced. Returns `None` for
/// strands with fewer than two atoms or with no length at all.
pub fn rethread_strand(strand: &Strand, spacing: f32) -> Option<Strand> {
    if strand.len() < 2 || !(spacing > 0.0) {
        return None;
    }

    let mut out = Vec::new();
    let mut carry = 0.0f32;
    for (a, b) in strand.iter().tuple_windows() {
        let Some(unit) = geometry::direction(&a.position, &b.position) else {
            trace!("Skipping zero-length segment while rethreading.");
            continue;
        };
        let segment = nalgebra::distance(&a.position, &b.position);
        while carry < segment {
            out.push(Atom::new(a.position + unit * carry));
            carry += spacing;
        }
        carry -= segment;
    }

    if out.is_empty() {
        warn!("Strand has zero arc length; leaving it unchanged.");
        return None;
    }
    Some(Strand::from_atoms(out))
}

/// Rethreads every strand in place. Returns how many strands changed.
pub fn run(strands: &mut [Strand], spacing: f32) -> usize {
    let mut changed = 0;
    for (index, strand) in strands.iter_mut().enumerate() {
        if let Some(respaced) = rethread_strand(strand, spacing) {
            trace!(
                strand = index,
                before = strand.len(),
                after = respaced.len(),
                "Strand rethreaded."
            );
            *strand = respaced;
            changed += 1;
        }
    }
    changed
}
