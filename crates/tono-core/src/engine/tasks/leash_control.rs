use crate::core::models::strand::Strand;
use crate::core::utils::geometry;
use crate::engine::traversal::{Traversal, TraversalPolicy};
use tracing::instrument;

/// One leash pass over a single strand.
///
/// Each adjacent pair `(i, i + 1)` is visited once in traversal order. A pair
/// farther apart than `leash_length` is pulled together symmetrically so it
/// ends exactly `leash_length` apart. Coincident pairs are left alone, and the
/// endpoints never pair with each other.
pub fn run_strand(strand: &mut Strand, leash_length: f32, traversal: Traversal) {
    let atoms = strand.atoms_mut();
    let len = atoms.len();

    for i in traversal.order(len) {
        if i + 1 >= len {
            continue;
        }
        let (head, tail) = atoms.split_at_mut(i + 1);
        let a = &mut head[i].position;
        let b = &mut tail[0].position;

        let (v, d) = geometry::offset(a, b);
        if d > leash_length && d != 0.0 {
            let unit = v / d;
            geometry::split_shift(a, b, &unit, (leash_length - d) / 2.0);
        }
    }
}

/// One leash pass over every strand, each with its own traversal.
#[instrument(level = "trace", skip_all)]
pub fn run(strands: &mut [Strand], leash_length: f32, policy: &mut TraversalPolicy) {
    for strand in strands.iter_mut() {
        let traversal = policy.next_for(strand.len());
        run_strand(strand, leash_length, traversal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::traversal::Direction;
    use nalgebra::Point3;

    const TOLERANCE: f32 = 1e-5;

    fn xs(strand: &Strand) -> Vec<f32> {
        strand.iter().map(|a| a.position.x).collect()
    }

    #[test]
    fn overstretched_pair_is_pulled_to_exact_leash_length() {
        let mut strand =
            Strand::from_positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [3.0, 0.0, 0.0]]);
        run_strand(&mut strand, 1.5, Traversal::ascending_from(1));

        assert_eq!(xs(&strand), vec![0.0, 1.25, 2.75]);
    }

    #[test]
    fn pairs_within_leash_are_untouched() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.2, 0.0]];
        let mut strand = Strand::from_positions(&positions);
        let before = strand.clone();
        run_strand(&mut strand, 1.5, Traversal::descending_from(2));
        assert_eq!(strand, before);
    }

    #[test]
    fn coincident_atoms_are_not_perturbed() {
        let mut strand = Strand::from_positions(&[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]);
        let before = strand.clone();
        run_strand(&mut strand, 0.0, Traversal::ascending_from(0));
        assert_eq!(strand, before);
    }

    #[test]
    fn single_atom_and_empty_strands_are_noops() {
        let mut single = Strand::from_positions(&[[4.0, 0.0, 0.0]]);
        run_strand(&mut single, 1.0, Traversal::ascending_from(0));
        assert_eq!(single.atom(0).unwrap().position, Point3::new(4.0, 0.0, 0.0));

        let mut empty = Strand::new();
        run_strand(&mut empty, 1.0, Traversal::descending_from(3));
        assert!(empty.is_empty());
    }

    #[test]
    fn traversal_order_changes_the_convergence_path() {
        let positions = [[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [6.0, 0.0, 0.0]];

        let mut forward = Strand::from_positions(&positions);
        run_strand(&mut forward, 1.5, Traversal::ascending_from(0));
        assert_eq!(xs(&forward), vec![0.75, 3.375, 4.875]);

        let mut backward = Strand::from_positions(&positions);
        run_strand(&mut backward, 1.5, Traversal::new(1, Direction::Descending));
        assert_eq!(xs(&backward), vec![1.125, 2.625, 5.25]);

        // Whichever pair is corrected last ends exactly on the leash.
        let d = forward.atom(2).unwrap().position.x - forward.atom(1).unwrap().position.x;
        assert!((d - 1.5).abs() < TOLERANCE);
        let d = backward.atom(1).unwrap().position.x - backward.atom(0).unwrap().position.x;
        assert!((d - 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn run_visits_every_strand() {
        let mut strands = vec![
            Strand::from_positions(&[[0.0, 0.0, 0.0], [4.0, 0.0, 0.0]]),
            Strand::from_positions(&[[0.0, 5.0, 0.0], [0.0, 9.0, 0.0]]),
        ];
        let mut policy = TraversalPolicy::seeded(7);
        run(&mut strands, 2.0, &mut policy);

        for strand in &strands {
            let d = nalgebra::distance(
                &strand.atom(0).unwrap().position,
                &strand.atom(1).unwrap().position,
            );
            assert!((d - 2.0).abs() < TOLERANCE);
        }
    }
}
