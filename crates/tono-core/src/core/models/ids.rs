/// A stable reference to an atom: its strand index and its position in that strand.
///
/// Handles stay meaningful only while the strand layout is unchanged; any
/// resampling replaces strands wholesale, after which the owning index is
/// rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AtomHandle {
    pub strand: usize,
    pub atom: usize,
}

impl AtomHandle {
    #[inline]
    pub const fn new(strand: usize, atom: usize) -> Self {
        Self { strand, atom }
    }
}
