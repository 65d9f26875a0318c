use super::config::RelaxationConfig;
use super::error::EngineError;
use super::neighbors::NeighborIndex;
use super::tasks::{force_integration, interpolate, leash_control, overlap_removal, rethread};
use super::traversal::{Traversal, TraversalPolicy};
use crate::core::io::knot_text::KnotTextFile;
use crate::core::io::traits::KnotFile;
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomHandle;
use crate::core::models::knot::Knot;
use crate::core::models::parameters::KnotParameters;
use crate::core::models::strand::Strand;
use crate::core::utils::geometry;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// What a single [`KnotModel::iterate`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationReport {
    /// Zero-based index of the iteration that just ran.
    pub iteration: u64,
    pub neighbors_rebuilt: bool,
    /// Overlap passes run, including the final clean pass when converged.
    pub overlap_passes: usize,
    /// `false` only when a configured pass cap cut overlap removal short.
    pub converged: bool,
}

/// The live, mutable relaxation state of a knot.
///
/// Owns the knot, the neighbor index derived from it, the traversal policy
/// and the iteration counter. Cloning produces a fully independent deep copy
/// (see [`KnotModel::snapshot_copy`]).
#[derive(Debug, Clone)]
pub struct KnotModel {
    knot: Knot,
    config: RelaxationConfig,
    neighbors: NeighborIndex,
    neighbors_stale: bool,
    iteration_count: u64,
    traversal: TraversalPolicy,
}

impl Default for KnotModel {
    fn default() -> Self {
        Self::new(Knot::default())
    }
}

impl KnotModel {
    /// Wraps a knot. The neighbor index is built lazily on first use.
    pub fn new(knot: Knot) -> Self {
        Self {
            knot,
            config: RelaxationConfig::default(),
            neighbors: NeighborIndex::default(),
            neighbors_stale: true,
            iteration_count: 0,
            traversal: TraversalPolicy::default(),
        }
    }

    /// An empty model (no strands) with validated parameters.
    pub fn with_parameters(parameters: KnotParameters) -> Result<Self, EngineError> {
        parameters.validate()?;
        Ok(Self::new(Knot::new(parameters)))
    }

    pub fn with_config(mut self, config: RelaxationConfig) -> Self {
        self.config = config;
        self
    }

    /// Makes every randomized traversal reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.traversal = TraversalPolicy::seeded(seed);
        self
    }

    pub fn with_traversal(mut self, policy: TraversalPolicy) -> Self {
        self.traversal = policy;
        self
    }

    pub fn set_traversal_policy(&mut self, policy: TraversalPolicy) {
        self.traversal = policy;
    }

    pub fn config(&self) -> &RelaxationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RelaxationConfig) {
        self.config = config;
    }

    pub fn knot(&self) -> &Knot {
        &self.knot
    }

    pub fn into_knot(self) -> Knot {
        self.knot
    }

    pub fn parameters(&self) -> &KnotParameters {
        &self.knot.parameters
    }

    /// Replaces the physical parameters. Rejects non-positive radius or leash.
    pub fn set_parameters(&mut self, parameters: KnotParameters) -> Result<(), EngineError> {
        parameters.validate()?;
        self.knot.parameters = parameters;
        self.neighbors_stale = true;
        Ok(())
    }

    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    pub fn strand_count(&self) -> usize {
        self.knot.strand_count()
    }

    pub fn total_atoms(&self) -> usize {
        self.knot.total_atoms()
    }

    /// Appends a strand of atoms at rest built from bare `[x, y, z]` triples.
    /// Returns the new strand's index.
    pub fn add_strand_from_raw_coordinates(
        &mut self,
        coordinates: &[[f32; 3]],
    ) -> Result<usize, EngineError> {
        self.add_strand(Strand::from_positions(coordinates))
    }

    /// Appends a strand and returns its index. Empty strands are rejected,
    /// since the text layout cannot represent them and every later index
    /// would shift on the next load.
    pub fn add_strand(&mut self, strand: Strand) -> Result<usize, EngineError> {
        if strand.is_empty() {
            return Err(EngineError::EmptyStrand);
        }
        self.neighbors_stale = true;
        Ok(self.knot.add_strand(strand))
    }

    pub fn strand(&self, strand: usize) -> Result<&Strand, EngineError> {
        self.knot
            .strand(strand)
            .ok_or(EngineError::OutOfRange { strand, atom: None })
    }

    pub fn atom(&self, strand: usize, atom: usize) -> Result<&Atom, EngineError> {
        self.knot
            .atom(AtomHandle::new(strand, atom))
            .ok_or(EngineError::OutOfRange {
                strand,
                atom: Some(atom),
            })
    }

    /// Mutable access to one atom, mainly for setting its force accumulator.
    pub fn atom_mut(&mut self, strand: usize, atom: usize) -> Result<&mut Atom, EngineError> {
        self.knot
            .atom_mut(AtomHandle::new(strand, atom))
            .ok_or(EngineError::OutOfRange {
                strand,
                atom: Some(atom),
            })
    }

    pub fn neighbors(&self) -> &NeighborIndex {
        &self.neighbors
    }

    pub fn rebuild_neighbors(&mut self) {
        self.neighbors = NeighborIndex::build(self.knot.strands(), &self.knot.parameters);
        self.neighbors_stale = false;
    }

    fn ensure_neighbors(&mut self) {
        if self.neighbors_stale || !self.neighbors.matches_layout(self.knot.strands()) {
            self.rebuild_neighbors();
        }
    }

    /// One overlap pass over all strands. Returns whether anything was corrected.
    pub fn remove_overlaps(&mut self) -> bool {
        self.ensure_neighbors();
        let params = self.knot.parameters;
        overlap_removal::run(
            self.knot.strands_mut(),
            &self.neighbors,
            &params,
            &mut self.traversal,
        )
    }

    /// One overlap pass over a single strand with an explicit traversal.
    pub fn remove_overlaps_in_strand(
        &mut self,
        strand: usize,
        traversal: Traversal,
    ) -> Result<bool, EngineError> {
        self.strand(strand)?;
        self.ensure_neighbors();
        let params = self.knot.parameters;
        Ok(overlap_removal::run_strand(
            self.knot.strands_mut(),
            strand,
            &self.neighbors,
            &params,
            traversal,
        ))
    }

    /// One leash pass over every strand.
    pub fn control_leashes(&mut self) {
        let leash = self.knot.parameters.leash_length;
        leash_control::run(self.knot.strands_mut(), leash, &mut self.traversal);
    }

    /// One leash pass over a single strand with an explicit traversal.
    pub fn control_leashes_in_strand(
        &mut self,
        strand: usize,
        traversal: Traversal,
    ) -> Result<(), EngineError> {
        let leash = self.knot.parameters.leash_length;
        let target = self
            .knot
            .strand_mut(strand)
            .ok_or(EngineError::OutOfRange { strand, atom: None })?;
        leash_control::run_strand(target, leash, traversal);
        Ok(())
    }

    pub fn apply_forces(&mut self) {
        force_integration::run(self.knot.strands_mut());
    }

    /// Runs one relaxation step.
    ///
    /// Rebuilds the neighbor index when the iteration count is a multiple of
    /// the rebuild interval (or the layout changed), removes overlaps until a
    /// pass finds none, runs one leash pass, then integrates forces. Overlap
    /// removal is unbounded unless the config sets a pass cap.
    #[instrument(level = "debug", skip_all, fields(iteration = self.iteration_count))]
    pub fn iterate(&mut self) -> IterationReport {
        let due = self.iteration_count % self.config.neighbor_rebuild_interval.max(1) == 0;
        let neighbors_rebuilt = due || self.neighbors_stale;
        if neighbors_rebuilt {
            self.rebuild_neighbors();
        }

        let params = self.knot.parameters;
        let outcome = overlap_removal::run_to_fixed_point(
            self.knot.strands_mut(),
            &self.neighbors,
            &params,
            &mut self.traversal,
            self.config.max_overlap_passes,
        );
        leash_control::run(
            self.knot.strands_mut(),
            params.leash_length,
            &mut self.traversal,
        );
        force_integration::run(self.knot.strands_mut());

        let report = IterationReport {
            iteration: self.iteration_count,
            neighbors_rebuilt,
            overlap_passes: outcome.passes,
            converged: outcome.converged,
        };
        self.iteration_count += 1;
        debug!(passes = report.overlap_passes, "Iteration complete.");
        report
    }

    /// Doubles every strand's resolution and rebuilds the neighbor index.
    pub fn interpolate(&mut self) -> usize {
        let before = self.total_atoms();
        let changed = interpolate::run(self.knot.strands_mut());
        self.rebuild_neighbors();
        info!(
            strands = changed,
            atoms_before = before,
            atoms_after = self.total_atoms(),
            "Interpolated knot."
        );
        changed
    }

    /// Re-spaces every strand at `leash_length` intervals along its path and
    /// rebuilds the neighbor index.
    pub fn rethread(&mut self) -> usize {
        let before = self.total_atoms();
        let spacing = self.knot.parameters.leash_length;
        let changed = rethread::run(self.knot.strands_mut(), spacing);
        self.rebuild_neighbors();
        info!(
            strands = changed,
            atoms_before = before,
            atoms_after = self.total_atoms(),
            "Rethreaded knot."
        );
        changed
    }

    /// An independent deep copy, e.g. kept as the initial state for a reset.
    pub fn snapshot_copy(&self) -> Self {
        self.clone()
    }

    /// An immutable copy of the current knot for observers.
    pub fn publish(&self) -> Arc<Knot> {
        Arc::new(self.knot.clone())
    }

    /// Parses the persisted text layout.
    pub fn load(bytes: &[u8]) -> Result<Self, EngineError> {
        let knot = KnotTextFile::from_bytes(bytes)?;
        info!(
            strands = knot.strand_count(),
            atoms = knot.total_atoms(),
            "Loaded knot."
        );
        Ok(Self::new(knot))
    }

    /// Renders the persisted text layout.
    pub fn save(&self) -> Vec<u8> {
        self.serialize().into_bytes()
    }

    pub fn serialize(&self) -> String {
        KnotTextFile::to_text(&self.knot)
    }

    pub fn deserialize(text: &str) -> Result<Self, EngineError> {
        Self::load(text.as_bytes())
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let knot = KnotTextFile::read_from_path(path.as_ref())?;
        info!(
            path = %path.as_ref().display(),
            strands = knot.strand_count(),
            atoms = knot.total_atoms(),
            "Loaded knot from file."
        );
        Ok(Self::new(knot))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
        KnotTextFile::write_to_path(&self.knot, path.as_ref())?;
        info!(path = %path.as_ref().display(), "Saved knot.");
        Ok(())
    }

    /// Replaces the knot with one read from `path`, resetting the iteration
    /// count. On failure the model is left exactly as it was.
    pub fn reload_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), EngineError> {
        let knot = KnotTextFile::read_from_path(path.as_ref())?;
        self.knot = knot;
        self.neighbors = NeighborIndex::default();
        self.neighbors_stale = true;
        self.iteration_count = 0;
        Ok(())
    }

    /// Largest amount by which any adjacent pair exceeds the leash; zero when all comply.
    pub fn max_leash_violation(&self) -> f32 {
        let leash = self.knot.parameters.leash_length;
        self.knot
            .strands()
            .iter()
            .map(|strand| geometry::max_excess(strand.iter().map(|a| &a.position), leash))
            .fold(0.0, f32::max)
    }

    /// Smallest distance between an atom and any of its indexed neighbors.
    pub fn min_neighbor_separation(&self) -> Option<f32> {
        self.knot
            .handles()
            .flat_map(|me| {
                self.neighbors
                    .neighbors(me)
                    .iter()
                    .filter(move |&&other| other != me)
                    .map(move |&other| (me, other))
            })
            .filter_map(|(me, other)| {
                let a = self.knot.atom(me)?;
                let b = self.knot.atom(other)?;
                Some(nalgebra::distance(&a.position, &b.position))
            })
            .reduce(f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::RelaxationConfigBuilder;
    use crate::engine::traversal::Direction;
    use nalgebra::{Point3, Vector3};
    use tempfile::tempdir;

    const TOLERANCE: f32 = 1e-5;

    fn scenario_model() -> KnotModel {
        let mut model = KnotModel::with_parameters(KnotParameters {
            atom_radius: 1.0,
            leash_length: 1.5,
            delta: 0.1,
            eta: 0.2,
            skipped: 1,
        })
        .unwrap();
        model
            .add_strand_from_raw_coordinates(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [3.0, 0.0, 0.0]])
            .unwrap();
        model
    }

    fn trefoil_like(points: usize) -> Vec<[f32; 3]> {
        (0..points)
            .map(|i| {
                let t = i as f32 / points as f32 * std::f32::consts::TAU;
                [
                    6.0 * ((t).sin() + 2.0 * (2.0 * t).sin()),
                    6.0 * ((t).cos() - 2.0 * (2.0 * t).cos()),
                    -6.0 * (3.0 * t).sin(),
                ]
            })
            .collect()
    }

    #[test]
    fn empty_model_operations_are_noops() {
        let mut model = KnotModel::default().with_seed(1);
        assert_eq!(model.strand_count(), 0);
        let report = model.iterate();
        assert!(report.converged);
        assert_eq!(report.overlap_passes, 1);
        assert_eq!(model.interpolate(), 0);
        assert_eq!(model.rethread(), 0);
        assert!(!model.remove_overlaps());
        assert_eq!(model.min_neighbor_separation(), None);
        assert_eq!(model.iteration_count(), 1);
    }

    #[test]
    fn accessors_reject_invalid_indices() {
        let model = scenario_model();
        assert!(model.atom(0, 2).is_ok());
        assert!(matches!(
            model.atom(0, 3),
            Err(EngineError::OutOfRange {
                strand: 0,
                atom: Some(3)
            })
        ));
        assert!(matches!(
            model.atom(1, 0),
            Err(EngineError::OutOfRange { strand: 1, .. })
        ));
        assert!(matches!(
            model.strand(5),
            Err(EngineError::OutOfRange {
                strand: 5,
                atom: None
            })
        ));
    }

    #[test]
    fn leash_scenario_corrects_only_the_overstretched_pair() {
        let mut model = scenario_model();
        model
            .control_leashes_in_strand(0, Traversal::new(1, Direction::Ascending))
            .unwrap();

        let xs: Vec<f32> = model
            .strand(0)
            .unwrap()
            .iter()
            .map(|a| a.position.x)
            .collect();
        assert_eq!(xs, vec![0.0, 1.25, 2.75]);
        assert!(model.control_leashes_in_strand(3, Traversal::ascending_from(0)).is_err());
    }

    #[test]
    fn leash_pass_on_all_strands_leaves_no_violation_for_independent_pairs() {
        let mut model = KnotModel::default().with_seed(5);
        model.add_strand_from_raw_coordinates(&[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0]]).unwrap();
        model.add_strand_from_raw_coordinates(&[[0.0, 9.0, 0.0], [0.0, 9.0, 4.0]]).unwrap();
        assert!(model.max_leash_violation() > 3.0);
        model.control_leashes();
        assert!(model.max_leash_violation() < TOLERANCE);
    }

    #[test]
    fn overlap_scenario_pushes_pair_apart() {
        let mut model = KnotModel::with_parameters(KnotParameters {
            atom_radius: 0.5,
            leash_length: 2.0,
            delta: 0.1,
            eta: 0.2,
            skipped: 1,
        })
        .unwrap()
        .with_seed(9);
        model.add_strand_from_raw_coordinates(&[[0.0, 0.0, 0.0]]).unwrap();
        model.add_strand_from_raw_coordinates(&[[0.0, 0.5, 0.0]]).unwrap();

        assert!(model.remove_overlaps());
        let d = nalgebra::distance(
            &model.atom(0, 0).unwrap().position,
            &model.atom(1, 0).unwrap().position,
        );
        assert!((d - 1.1).abs() < TOLERANCE);
        assert!(!model.remove_overlaps());
        assert!(model.min_neighbor_separation().unwrap() >= 1.0);
    }

    #[test]
    fn iterate_rebuilds_neighbors_on_schedule() {
        let config = RelaxationConfigBuilder::new()
            .neighbor_rebuild_interval(3)
            .build()
            .unwrap();
        let mut model = scenario_model().with_config(config).with_seed(2);

        let rebuilt: Vec<bool> = (0..7).map(|_| model.iterate().neighbors_rebuilt).collect();
        assert_eq!(rebuilt, vec![true, false, false, true, false, false, true]);
        assert_eq!(model.iteration_count(), 7);
    }

    #[test]
    fn default_config_rebuilds_every_200_iterations() {
        let mut model = scenario_model().with_seed(8);
        assert_eq!(model.config(), &RelaxationConfig::default());

        let rebuilt: Vec<u64> = (0..201)
            .map(|_| model.iterate())
            .filter(|report| report.neighbors_rebuilt)
            .map(|report| report.iteration)
            .collect();
        assert_eq!(rebuilt, vec![0, 200]);
    }

    #[test]
    fn non_finite_force_does_not_stall_unbounded_overlap_removal() {
        let mut model = KnotModel::with_parameters(KnotParameters {
            atom_radius: 0.5,
            leash_length: 2.0,
            delta: 0.1,
            eta: 0.2,
            skipped: 1,
        })
        .unwrap()
        .with_seed(12);
        model.add_strand_from_raw_coordinates(&[[0.0, 0.0, 0.0]]).unwrap();
        model.add_strand_from_raw_coordinates(&[[1.1, 0.0, 0.0]]).unwrap();
        model.atom_mut(0, 0).unwrap().force = Vector3::new(f32::NAN, 0.0, 0.0);
        assert_eq!(model.config().max_overlap_passes, None);

        model.iterate();
        let report = model.iterate();

        assert!(report.converged);
        assert_eq!(report.overlap_passes, 1);
        assert!(model.atom(0, 0).unwrap().position.x.is_nan());
    }

    #[test]
    fn structural_changes_force_a_rebuild_on_next_iteration() {
        let mut model = scenario_model().with_seed(2);
        assert!(model.iterate().neighbors_rebuilt);
        assert!(!model.iterate().neighbors_rebuilt);
        model.add_strand_from_raw_coordinates(&[[20.0, 0.0, 0.0]]).unwrap();
        assert!(model.iterate().neighbors_rebuilt);
    }

    #[test]
    fn iterate_applies_forces_after_constraints() {
        let mut model = KnotModel::default().with_seed(4);
        model.add_strand_from_raw_coordinates(&[[0.0, 0.0, 0.0]]).unwrap();
        model.atom_mut(0, 0).unwrap().force = Vector3::new(0.25, 0.0, -0.5);

        model.iterate();
        model.iterate();

        let atom = model.atom(0, 0).unwrap();
        assert_eq!(atom.position, Point3::new(0.5, 0.0, -1.0));
        assert_eq!(atom.force, Vector3::new(0.25, 0.0, -0.5));
    }

    #[test]
    fn iterations_tighten_a_loose_knot_without_violating_constraints() {
        let mut model = KnotModel::with_parameters(KnotParameters {
            atom_radius: 0.5,
            leash_length: 0.8,
            delta: 0.05,
            eta: 0.3,
            skipped: 3,
        })
        .unwrap()
        .with_seed(2024);
        model.add_strand_from_raw_coordinates(&trefoil_like(120)).unwrap();
        let length_before = model.strand(0).unwrap().arc_length();

        for _ in 0..20 {
            let report = model.iterate();
            assert!(report.converged);
        }

        assert_eq!(model.strand(0).unwrap().len(), 120);
        assert!(model.strand(0).unwrap().arc_length() < length_before);
    }

    #[test]
    fn pass_cap_is_reported_without_panicking() {
        let config = RelaxationConfigBuilder::new()
            .max_overlap_passes(1)
            .build()
            .unwrap();
        let mut model = KnotModel::with_parameters(KnotParameters {
            atom_radius: 0.5,
            leash_length: 5.0,
            delta: 0.1,
            eta: 0.2,
            skipped: 1,
        })
        .unwrap()
        .with_config(config)
        .with_seed(3);
        model.add_strand_from_raw_coordinates(&[[0.0, 0.0, 0.0]]).unwrap();
        model.add_strand_from_raw_coordinates(&[[0.1, 0.0, 0.0]]).unwrap();

        let report = model.iterate();
        assert!(!report.converged);
        assert_eq!(report.overlap_passes, 1);
    }

    #[test]
    fn interpolate_and_rethread_resample_and_refresh_neighbors() {
        let mut model = scenario_model();
        assert_eq!(model.interpolate(), 1);
        assert_eq!(model.strand(0).unwrap().len(), 5);
        assert!(model.neighbors().matches_layout(model.knot().strands()));
        assert_eq!(
            model.atom(0, 4).unwrap().position,
            Point3::new(3.0, 0.0, 0.0)
        );

        assert_eq!(model.rethread(), 1);
        let xs: Vec<f32> = model
            .strand(0)
            .unwrap()
            .iter()
            .map(|a| a.position.x)
            .collect();
        assert_eq!(xs, vec![0.0, 1.5]);
        assert!(model.neighbors().matches_layout(model.knot().strands()));
    }

    #[test]
    fn snapshot_copy_is_independent_of_the_live_model() {
        let mut model = scenario_model().with_seed(8);
        let initial = model.snapshot_copy();
        let published = model.publish();

        model.interpolate();
        model.iterate();

        assert_eq!(initial.strand(0).unwrap().len(), 3);
        assert_eq!(initial.iteration_count(), 0);
        assert_eq!(published.total_atoms(), 3);
        assert_eq!(model.strand(0).unwrap().len(), 5);
    }

    #[test]
    fn same_seed_gives_bit_identical_runs() {
        let build = || {
            let mut model = KnotModel::with_parameters(KnotParameters {
                atom_radius: 0.5,
                leash_length: 0.8,
                delta: 0.05,
                eta: 0.3,
                skipped: 3,
            })
            .unwrap()
            .with_seed(77);
            model.add_strand_from_raw_coordinates(&trefoil_like(60)).unwrap();
            model
        };
        let mut a = build();
        let mut b = build();
        for _ in 0..5 {
            a.iterate();
            b.iterate();
        }
        assert_eq!(a.knot(), b.knot());
    }

    #[test]
    fn set_parameters_validates() {
        let mut model = scenario_model();
        let mut params = *model.parameters();
        params.leash_length = 0.0;
        assert!(matches!(
            model.set_parameters(params),
            Err(EngineError::Parameters(_))
        ));
        assert_eq!(model.parameters().leash_length, 1.5);

        params.leash_length = 2.0;
        model.set_parameters(params).unwrap();
        assert_eq!(model.parameters().leash_length, 2.0);
    }

    #[test]
    fn text_round_trip_preserves_structure() {
        let mut model = scenario_model();
        model.add_strand_from_raw_coordinates(&[[5.0, 5.0, 5.0], [6.0, 5.0, 5.0]]).unwrap();
        model.atom_mut(1, 1).unwrap().force = Vector3::new(0.0, 0.01, 0.0);

        let restored = KnotModel::deserialize(&model.serialize()).unwrap();
        assert_eq!(restored.knot(), model.knot());
        assert_eq!(KnotModel::load(&model.save()).unwrap().knot(), model.knot());
    }

    #[test]
    fn empty_strands_are_rejected_and_indices_survive_a_round_trip() {
        let mut model = KnotModel::default();
        assert_eq!(model.add_strand_from_raw_coordinates(&[[0.0, 0.0, 0.0]]).unwrap(), 0);
        assert!(matches!(
            model.add_strand_from_raw_coordinates(&[]),
            Err(EngineError::EmptyStrand)
        ));
        assert!(matches!(
            model.add_strand(Strand::new()),
            Err(EngineError::EmptyStrand)
        ));
        assert_eq!(model.add_strand_from_raw_coordinates(&[[5.0, 0.0, 0.0]]).unwrap(), 1);

        let restored = KnotModel::deserialize(&model.serialize()).unwrap();
        assert_eq!(restored.strand_count(), 2);
        assert_eq!(restored.total_atoms(), 2);
        assert_eq!(restored.atom(1, 0).unwrap().position, Point3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn non_finite_atom_field_fails_to_load() {
        let text = "0.5\t2.0\t0.1\t0.2\t1\nc\n0\t0\t0\tNaN\t0\t0\n\n1.1\t0\t0\n";
        assert!(matches!(
            KnotModel::deserialize(text),
            Err(EngineError::Format(_))
        ));
    }

    #[test]
    fn loading_empty_input_is_a_format_error() {
        assert!(matches!(KnotModel::load(b""), Err(EngineError::Format(_))));
    }

    #[test]
    fn failed_reload_leaves_model_unchanged() {
        let dir = tempdir().unwrap();
        let mut model = scenario_model().with_seed(1);
        model.iterate();
        let before = model.knot().clone();

        let missing = model.reload_from_path(dir.path().join("missing.txt"));
        assert!(matches!(missing, Err(EngineError::Io(_))));

        let bad = dir.path().join("bad.txt");
        std::fs::write(&bad, "1.0\t1.5\nc\n0\tnot-a-number\t0\n").unwrap();
        assert!(matches!(
            model.reload_from_path(&bad),
            Err(EngineError::Format(_))
        ));

        assert_eq!(model.knot(), &before);
        assert_eq!(model.iteration_count(), 1);
    }

    #[test]
    fn save_and_reload_through_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("knot.txt");
        let model = scenario_model();
        model.save_to_path(&path).unwrap();

        let loaded = KnotModel::load_from_path(&path).unwrap();
        assert_eq!(loaded.knot(), model.knot());

        let mut other = KnotModel::default();
        other.reload_from_path(&path).unwrap();
        assert_eq!(other.strand_count(), 1);
        assert_eq!(other.iteration_count(), 0);
    }
}
