use crate::core::models::ids::AtomHandle;
use crate::core::models::parameters::KnotParameters;
use crate::core::models::strand::Strand;
use crate::engine::neighbors::NeighborIndex;
use crate::engine::traversal::{Traversal, TraversalPolicy};
use nalgebra::{Point3, Vector3};
use tracing::{instrument, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapOutcome {
    /// Passes run, including the final pass that found nothing.
    pub passes: usize,
    /// `false` when a pass cap stopped the loop before a clean pass.
    pub converged: bool,
}

fn position(strands: &[Strand], handle: AtomHandle) -> Option<Point3<f32>> {
    strands
        .get(handle.strand)?
        .atom(handle.atom)
        .map(|atom| atom.position)
}

fn set_position(strands: &mut [Strand], handle: AtomHandle, position: Point3<f32>) {
    if let Some(atom) = strands
        .get_mut(handle.strand)
        .and_then(|strand| strand.atom_mut(handle.atom))
    {
        atom.position = position;
    }
}

/// One overlap pass over the atoms of a single strand.
///
/// Every indexed neighbor of every atom (in traversal order) is tested
/// against the current positions, which already include corrections made
/// earlier in the same pass. A pair closer than `2 * atom_radius` is pushed
/// apart along the line joining them, symmetrically, to a separation of
/// `2 * atom_radius + delta`. Returns whether any pair was corrected.
pub fn run_strand(
    strands: &mut [Strand],
    strand_index: usize,
    neighbors: &NeighborIndex,
    params: &KnotParameters,
    traversal: Traversal,
) -> bool {
    let Some(len) = strands.get(strand_index).map(Strand::len) else {
        return false;
    };
    let contact = params.contact_distance();
    let contact_sq = contact * contact;
    let target = params.corrected_separation();
    let mut corrected = false;

    for i in traversal.order(len) {
        let me = AtomHandle::new(strand_index, i);
        for &other in neighbors.neighbors(me) {
            if other == me {
                continue;
            }
            let (Some(p), Some(q)) = (position(strands, me), position(strands, other)) else {
                continue;
            };

            let v = q - p;
            let d2 = v.norm_squared();
            // NaN compares false, so a non-finite pair never counts as a correction.
            if !(d2 < contact_sq) {
                continue;
            }

            corrected = true;
            // Coincident atoms have no joining line; separate them along x.
            let (unit, d) = if d2 == 0.0 {
                (Vector3::x(), 0.0)
            } else {
                let d = d2.sqrt();
                (v / d, d)
            };
            let half_shift = (target - d) / 2.0;
            set_position(strands, me, p - unit * half_shift);
            set_position(strands, other, q + unit * half_shift);
        }
    }
    corrected
}

/// One overlap pass over every strand. Returns whether any pair was corrected.
pub fn run(
    strands: &mut [Strand],
    neighbors: &NeighborIndex,
    params: &KnotParameters,
    policy: &mut TraversalPolicy,
) -> bool {
    let mut corrected = false;
    for strand_index in 0..strands.len() {
        let traversal = policy.next_for(strands[strand_index].len());
        corrected |= run_strand(strands, strand_index, neighbors, params, traversal);
    }
    corrected
}

/// Repeats full passes until one corrects nothing ("shrink on no overlap"),
/// or until `max_passes` passes have run.
#[instrument(level = "debug", skip_all)]
pub fn run_to_fixed_point(
    strands: &mut [Strand],
    neighbors: &NeighborIndex,
    params: &KnotParameters,
    policy: &mut TraversalPolicy,
    max_passes: Option<usize>,
) -> OverlapOutcome {
    let mut passes = 0;
    loop {
        passes += 1;
        if !run(strands, neighbors, params, policy) {
            trace!(passes, "Overlap removal reached a fixed point.");
            return OverlapOutcome {
                passes,
                converged: true,
            };
        }
        if let Some(max) = max_passes {
            if passes >= max {
                warn!(
                    passes,
                    "Overlap removal stopped at the pass limit with overlaps remaining."
                );
                return OverlapOutcome {
                    passes,
                    converged: false,
                };
            }
        }
    }
}
