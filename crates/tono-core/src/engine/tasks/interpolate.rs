use crate::core::models::atom::Atom;
use crate::core::models::strand::Strand;
use itertools::Itertools;

/// Doubles the resolution of one strand: `L` atoms become `2L - 1`.
///
/// Original atoms keep their values and land on even indices; each odd index
/// holds the componentwise mean (position and force) of its two neighbors.
/// Returns `None` for strands with fewer than two atoms.
pub fn interpolate_strand(strand: &Strand) -> Option<Strand> {
    let atoms = strand.atoms();
    let first = *atoms.first()?;
    if atoms.len() < 2 {
        return None;
    }

    let mut out = Vec::with_capacity(atoms.len() * 2 - 1);
    out.push(first);
    for (a, b) in atoms.iter().tuple_windows() {
        out.push(Atom::midpoint(a, b));
        out.push(*b);
    }
    Some(Strand::from_atoms(out))
}

/// Interpolates every strand in place. Returns how many strands changed.
pub fn run(strands: &mut [Strand]) -> usize {
    let mut changed = 0;
    for strand in strands.iter_mut() {
        if let Some(dense) = interpolate_strand(strand) {
            *strand = dense;
            changed += 1;
        }
    }
    changed
}
