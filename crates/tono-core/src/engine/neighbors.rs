use crate::core::models::ids::AtomHandle;
use crate::core::models::parameters::KnotParameters;
use crate::core::models::strand::Strand;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-atom proximity lists bounding the overlap checks.
///
/// For every atom the index stores handles of all atoms, on any strand,
/// closer than `2 * atom_radius + eta`, except same-strand atoms fewer than
/// `skipped` indices away. Lists are computed independently per atom, so a
/// pair normally appears in both lists. The index is a cache: it goes stale
/// as atoms move and must be rebuilt after any change to the strand layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborIndex {
    lists: Vec<Vec<Vec<AtomHandle>>>,
}

impl NeighborIndex {
    /// Rebuilds from scratch by testing every ordered atom pair.
    #[instrument(level = "debug", skip_all)]
    pub fn build(strands: &[Strand], params: &KnotParameters) -> Self {
        let cutoff = params.neighbor_cutoff();
        let skipped = params.skipped;

        let handles: Vec<AtomHandle> = strands
            .iter()
            .enumerate()
            .flat_map(|(s, strand)| (0..strand.len()).map(move |a| AtomHandle::new(s, a)))
            .collect();

        let find = |&me: &AtomHandle| -> Vec<AtomHandle> {
            let origin = strands[me.strand].atoms()[me.atom].position;
            handles
                .iter()
                .copied()
                .filter(|other| {
                    if other.strand == me.strand && other.atom.abs_diff(me.atom) < skipped {
                        return false;
                    }
                    let p = strands[other.strand].atoms()[other.atom].position;
                    nalgebra::distance(&origin, &p) < cutoff
                })
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let mut flat: Vec<Vec<AtomHandle>> = handles.iter().map(find).collect();

        #[cfg(feature = "parallel")]
        let mut flat: Vec<Vec<AtomHandle>> = handles.par_iter().map(find).collect();

        let mut lists = Vec::with_capacity(strands.len());
        for strand in strands.iter().rev() {
            let tail = flat.split_off(flat.len() - strand.len());
            lists.push(tail);
        }
        lists.reverse();

        let index = Self { lists };
        debug!(
            atoms = handles.len(),
            entries = index.total_entries(),
            cutoff,
            "Neighbor index rebuilt."
        );
        index
    }

    /// Neighbor handles of one atom; empty for unknown handles.
    pub fn neighbors(&self, handle: AtomHandle) -> &[AtomHandle] {
        self.lists
            .get(handle.strand)
            .and_then(|strand| strand.get(handle.atom))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_entries(&self) -> usize {
        self.lists.iter().flatten().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Whether the index was built for exactly this strand layout.
    pub fn matches_layout(&self, strands: &[Strand]) -> bool {
        self.lists.len() == strands.len()
            && self
                .lists
                .iter()
                .zip(strands)
                .all(|(lists, strand)| lists.len() == strand.len())
    }
}
