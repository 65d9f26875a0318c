use crate::core::models::strand::Strand;

/// Adds each atom's force accumulator to its position (unit-step Euler).
///
/// Forces are an external input, typically a slow directed drift; the
/// accumulator is read but never cleared here.
pub fn run(strands: &mut [Strand]) {
    for atom in strands.iter_mut().flat_map(Strand::atoms_mut) {
        atom.position += atom.force;
    }
}
