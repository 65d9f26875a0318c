use super::atom::Atom;
use super::ids::AtomHandle;
use super::parameters::KnotParameters;
use super::strand::Strand;

/// A knotted tube: an ordered collection of strands plus its physical parameters.
///
/// Strand indices are stable external identifiers; resampling replaces a
/// strand in place at the same index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Knot {
    pub parameters: KnotParameters,
    strands: Vec<Strand>,
}

impl Knot {
    pub fn new(parameters: KnotParameters) -> Self {
        Self {
            parameters,
            strands: Vec::new(),
        }
    }

    pub fn with_strands(parameters: KnotParameters, strands: Vec<Strand>) -> Self {
        Self {
            parameters,
            strands,
        }
    }

    /// Appends a strand and returns its index. Unchecked; see
    /// `KnotModel::add_strand` for the entry point that rejects empty strands.
    pub fn add_strand(&mut self, strand: Strand) -> usize {
        self.strands.push(strand);
        self.strands.len() - 1
    }

    #[inline]
    pub fn strand_count(&self) -> usize {
        self.strands.len()
    }

    pub fn total_atoms(&self) -> usize {
        self.strands.iter().map(Strand::len).sum()
    }

    pub fn strand(&self, index: usize) -> Option<&Strand> {
        self.strands.get(index)
    }

    pub fn strand_mut(&mut self, index: usize) -> Option<&mut Strand> {
        self.strands.get_mut(index)
    }

    pub fn strands(&self) -> &[Strand] {
        &self.strands
    }

    pub fn strands_mut(&mut self) -> &mut [Strand] {
        &mut self.strands
    }

    pub fn atom(&self, handle: AtomHandle) -> Option<&Atom> {
        self.strands.get(handle.strand)?.atom(handle.atom)
    }

    pub fn atom_mut(&mut self, handle: AtomHandle) -> Option<&mut Atom> {
        self.strands.get_mut(handle.strand)?.atom_mut(handle.atom)
    }

    /// Iterates over the handles of every atom, strand by strand.
    pub fn handles(&self) -> impl Iterator<Item = AtomHandle> + '_ {
        self.strands
            .iter()
            .enumerate()
            .flat_map(|(s, strand)| (0..strand.len()).map(move |a| AtomHandle::new(s, a)))
    }
}
