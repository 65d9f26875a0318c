use super::atom::Atom;
use nalgebra::Point3;

/// An open chain of atoms.
///
/// Atom 0 and the last atom are endpoints: they have a single chain neighbor
/// and the chain never wraps around, even when the strand depicts a closed
/// loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Strand {
    atoms: Vec<Atom>,
}

impl Strand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Builds a strand of atoms at rest from bare positions.
    pub fn from_positions(positions: &[[f32; 3]]) -> Self {
        Self {
            atoms: positions
                .iter()
                .map(|&[x, y, z]| Atom::new(Point3::new(x, y, z)))
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// Total length of the polyline through the atom centers.
    pub fn arc_length(&self) -> f32 {
        self.atoms
            .windows(2)
            .map(|pair| nalgebra::distance(&pair[0].position, &pair[1].position))
            .sum()
    }
}

impl FromIterator<Atom> for Strand {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Strand {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}
