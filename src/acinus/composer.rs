use std::mem;

use tracing::{debug, info, instrument, warn};

use crate::error::{AcinarError, AssemblyError, Result};
use crate::kernel::{GeometryKernel, MeshingEngine};
use crate::math::Point3;
use crate::tessellation::{MeshParams, TriangleMesh};

use super::carve::{CarveAcinus, Carved};
use super::neighbors::neighbor_indices;
use super::params::SacParams;
use super::placement::SacLayout;
use super::pore::AddPoreChannels;

/// Where a [`SacComposer`] is in its fold over the placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    /// Nothing built yet.
    Empty,
    /// Tube fused with the first acinus.
    Seeded,
    /// Placement `k` (counting the seed as 0) has been folded in.
    Growing(usize),
    /// All placements folded in; the solid is ready for meshing.
    Final,
    /// A kernel call or boolean failed; the solid is lost.
    Failed,
}

impl ComposerState {
    /// Short name for error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Seeded => "Seeded",
            Self::Growing(_) => "Growing",
            Self::Final => "Final",
            Self::Failed => "Failed",
        }
    }
}

/// A wall carved between two placements, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seam {
    pub candidate: usize,
    pub neighbor: usize,
}

/// What the composer did while folding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Every carve, in fold order.
    pub seams: Vec<Seam>,
    /// Number of pore channels opened.
    pub pores: usize,
    /// Placements that had no neighbors and were added whole.
    pub isolated: Vec<usize>,
}

impl AssemblyReport {
    /// Distinct unordered seam pairs `(i, j)` with `i < j`, sorted.
    #[must_use]
    pub fn seam_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = self
            .seams
            .iter()
            .map(|s| (s.candidate.min(s.neighbor), s.candidate.max(s.neighbor)))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}

/// Builds a sac by folding acinus placements into one solid.
///
/// The first placement is fused with the tube. Each later placement is
/// carved against all of its neighbors in the layout, gets its pores, and
/// is united with the running solid after that solid has been trimmed to
/// the neighbors' side of the new walls. Placements are processed strictly
/// in list order.
pub struct SacComposer<K: GeometryKernel> {
    kernel: K,
    params: SacParams,
    layout: SacLayout,
    state: ComposerState,
    solid: Vec<K::Region>,
    report: AssemblyReport,
}

impl<K: GeometryKernel> SacComposer<K> {
    /// Creates a composer after checking the parameters and the layout.
    ///
    /// # Errors
    ///
    /// Returns a configuration error before any kernel call if the
    /// parameters or the layout are degenerate.
    pub fn new(kernel: K, params: SacParams, layout: SacLayout) -> Result<Self> {
        params.validate()?;
        layout.validate(&params)?;
        Ok(Self {
            kernel,
            params,
            layout,
            state: ComposerState::Empty,
            solid: Vec::new(),
            report: AssemblyReport::default(),
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ComposerState {
        self.state
    }

    /// The kernel holding the solid.
    #[must_use]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// The running solid.
    #[must_use]
    pub fn solid(&self) -> &[K::Region] {
        &self.solid
    }

    /// What has been done so far.
    #[must_use]
    pub fn report(&self) -> &AssemblyReport {
        &self.report
    }

    /// Fuses the tube with the first acinus.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::InvalidState`] unless the composer is empty,
    /// or any kernel error, after which the composer is
    /// [`ComposerState::Failed`].
    pub fn seed(&mut self) -> Result<()> {
        if self.state != ComposerState::Empty {
            return Err(self.invalid_state("Empty"));
        }
        let tube = self.layout.tube;
        let first = self.layout.placements[0];

        let fused = self
            .kernel
            .add_cylinder(tube.base, tube.axis, tube.radius)
            .and_then(|tube_region| {
                let sphere = self.kernel.add_sphere(first.center, first.radius)?;
                self.kernel.fuse(vec![tube_region], vec![sphere])
            });
        self.solid = self.settle(fused)?;
        self.state = ComposerState::Seeded;
        info!(center = ?first.center, "seeded tube and first acinus");
        Ok(())
    }

    /// Folds in the next placement and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::InvalidState`] if the composer is not seeded
    /// or nothing is left to place. Returns [`AssemblyError::KernelFailure`]
    /// if a boolean loses material a neighbor pair should have, or any kernel
    /// error; either one leaves the composer [`ComposerState::Failed`].
    #[instrument(skip_all, fields(state = self.state.name()))]
    pub fn step(&mut self) -> Result<ComposerState> {
        let count = self.layout.placements.len();
        let index = match self.state {
            ComposerState::Seeded => 1,
            ComposerState::Growing(k) if k + 1 < count => k + 1,
            _ => return Err(self.invalid_state("Seeded or Growing with placements left")),
        };
        let folded = self.fold(index);
        self.settle(folded)
    }

    /// Folds placement `index` into the running solid.
    fn fold(&mut self, index: usize) -> Result<ComposerState> {
        let placement = self.layout.placements[index];
        let centers = self.layout.centers();
        let indices = neighbor_indices(index, &centers, self.params.acinus_radius);
        let neighbors: Vec<Point3> = indices.iter().map(|&i| centers[i]).collect();
        let sphere = self.kernel.add_sphere(placement.center, placement.radius)?;

        if neighbors.is_empty() {
            warn!(
                index,
                center = ?placement.center,
                "placement has no neighbors, adding whole sphere"
            );
            let solid = mem::take(&mut self.solid);
            self.solid = self.kernel.fuse(solid, vec![sphere])?;
            self.report.isolated.push(index);
            self.state = ComposerState::Growing(index);
            return Ok(self.state);
        }

        let wall = self.params.wall_thickness;
        let Carved { acinus, exclude } =
            CarveAcinus::new(sphere, placement.center, neighbors.clone(), wall)
                .with_extent(self.params.half_space_extent)
                .execute(&mut self.kernel)?;
        let channeled = AddPoreChannels::new(
            acinus,
            placement.center,
            neighbors.clone(),
            wall,
            placement.effective_pore_radius(&self.params),
        )
        .execute(&mut self.kernel)?;

        if let Some(exclude) = exclude {
            let solid = mem::take(&mut self.solid);
            self.solid = self.kernel.intersect(solid, exclude)?;
            if self.solid.is_empty() {
                self.kernel.discard(channeled)?;
                return Err(AssemblyError::KernelFailure {
                    stage: "trim",
                    candidate: placement.center,
                    neighbor: neighbors[0],
                    reason: "running solid lies entirely on the new acinus' side".into(),
                }
                .into());
            }
        }
        let solid = mem::take(&mut self.solid);
        self.solid = self.kernel.fuse(solid, channeled)?;

        for &neighbor in &indices {
            debug!(candidate = index, neighbor, "seam carved");
            self.report.seams.push(Seam {
                candidate: index,
                neighbor,
            });
        }
        self.report.pores += indices.len();
        self.state = ComposerState::Growing(index);
        info!(index, neighbors = indices.len(), "placement folded");
        Ok(self.state)
    }

    /// Marks the fold complete.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::InvalidState`] unless every placement has
    /// been folded in.
    pub fn finish(&mut self) -> Result<()> {
        match self.state {
            ComposerState::Growing(k) if k + 1 == self.layout.placements.len() => {
                self.state = ComposerState::Final;
                info!(
                    seams = self.report.seam_pairs().len(),
                    pores = self.report.pores,
                    "sac complete"
                );
                Ok(())
            }
            _ => Err(self.invalid_state("Growing with all placements folded")),
        }
    }

    /// Hands out the finished model.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::InvalidState`] unless the composer is final.
    pub fn into_model(self) -> Result<SacModel<K>> {
        if self.state != ComposerState::Final {
            return Err(self.invalid_state("Final"));
        }
        Ok(SacModel {
            kernel: self.kernel,
            solid: self.solid,
            report: self.report,
        })
    }

    /// Seeds, folds every placement and finishes in one go.
    ///
    /// # Errors
    ///
    /// Returns the first configuration, assembly or kernel error.
    pub fn run(kernel: K, params: SacParams, layout: SacLayout) -> Result<SacModel<K>> {
        let mut composer = Self::new(kernel, params, layout)?;
        composer.seed()?;
        let last = composer.layout.placements.len() - 1;
        while composer.step()? != ComposerState::Growing(last) {}
        composer.finish()?;
        composer.into_model()
    }

    /// Marks the composer failed if `result` is an error.
    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            warn!(state = self.state.name(), error = %err, "composer failed");
            self.state = ComposerState::Failed;
        }
        result
    }

    fn invalid_state(&self, expected: &'static str) -> AcinarError {
        AssemblyError::InvalidState {
            state: self.state.name(),
            expected,
        }
        .into()
    }
}

/// A finished sac solid together with the kernel that owns it.
pub struct SacModel<K: GeometryKernel> {
    kernel: K,
    solid: Vec<K::Region>,
    report: AssemblyReport,
}

impl<K: GeometryKernel> SacModel<K> {
    /// The kernel holding the solid.
    #[must_use]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// The finished solid.
    #[must_use]
    pub fn solid(&self) -> &[K::Region] {
        &self.solid
    }

    /// What the composer did.
    #[must_use]
    pub fn report(&self) -> &AssemblyReport {
        &self.report
    }

    /// Splits the model into its parts.
    #[must_use]
    pub fn into_parts(self) -> (K, Vec<K::Region>, AssemblyReport) {
        (self.kernel, self.solid, self.report)
    }
}

impl<K: MeshingEngine> SacModel<K> {
    /// Meshes the finished solid.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid parameters or if meshing fails.
    pub fn mesh(&self, params: &MeshParams) -> Result<TriangleMesh> {
        self.kernel.generate_mesh(&self.solid, params)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::acinus::neighbors::overlapping_pairs;
    use crate::acinus::placement::{AcinusPlacement, Tube};
    use crate::error::{AcinarError, ConfigurationError};
    use crate::kernel::CsgKernel;
    use crate::operations::boolean::PointClassification;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn scaled() -> SacParams {
        SacParams::default()
            .with_acinus_radius(1.0)
            .with_tube_radius(0.35)
            .with_tube_length(1.0)
            .with_wall_thickness(0.15)
            .with_pore_radius(0.2)
            .with_half_space_extent(50.0)
    }

    fn pair_layout(params: &SacParams) -> SacLayout {
        SacLayout::new(
            Tube::vertical(params.tube_length, params.tube_radius),
            vec![
                AcinusPlacement::new(p(0.0, 0.0, 1.9), 1.0),
                AcinusPlacement::new(p(1.5, 0.0, 1.9), 1.0),
            ],
        )
    }

    #[test]
    fn two_acini_share_a_pored_wall() {
        init_tracing();
        let params = scaled();
        let model = SacComposer::run(CsgKernel::new(), params, pair_layout(&params)).unwrap();
        let kernel = model.kernel();
        let at = |point: Point3| kernel.classify(model.solid(), &point).unwrap();

        assert_eq!(at(p(0.75, 0.0, 1.9)), PointClassification::Inside);
        assert_eq!(at(p(0.75, 0.4, 1.9)), PointClassification::Outside);
        assert_eq!(at(p(0.55, 0.4, 1.9)), PointClassification::Inside);
        assert_eq!(at(p(0.95, 0.4, 1.9)), PointClassification::Inside);
        assert_eq!(at(p(0.0, 0.0, 0.5)), PointClassification::Inside);
        // The channel axis, including both wall faces at x = 0.675 and 0.825.
        for i in 0..=300 {
            let x = f64::from(i) * 0.005;
            assert_eq!(at(p(x, 0.0, 1.9)), PointClassification::Inside, "gap at x = {x}");
        }
        for face in [0.675, 0.825] {
            assert_eq!(at(p(face, 0.1, 1.9)), PointClassification::Inside);
        }

        assert_eq!(kernel.components(model.solid()).unwrap(), 1);
        assert_eq!(model.report().seam_pairs(), vec![(0, 1)]);
        assert_eq!(model.report().pores, 1);
    }

    #[test]
    fn bottom_up_sac_is_one_piece() {
        init_tracing();
        let params = scaled();
        let layout = SacLayout::bottom_up(&params);
        let centers = layout.centers();
        let model = SacComposer::run(CsgKernel::new(), params, layout).unwrap();

        let expected = overlapping_pairs(&centers, params.acinus_radius);
        assert_eq!(expected.len(), 5);
        assert_eq!(model.report().seam_pairs(), expected);
        assert_eq!(model.report().pores, 7);
        assert!(model.report().isolated.is_empty());
        assert_eq!(model.kernel().components(model.solid()).unwrap(), 1);

        let mesh = model.mesh(&MeshParams::default()).unwrap();
        assert!(!mesh.indices.is_empty());
    }

    #[test]
    fn reordered_placements_stay_connected() {
        let params = scaled();
        let mut layout = SacLayout::bottom_up(&params);
        layout.placements.swap(1, 2);
        let model = SacComposer::run(CsgKernel::new(), params, layout).unwrap();
        assert_eq!(model.report().seam_pairs().len(), 5);
        assert_eq!(model.kernel().components(model.solid()).unwrap(), 1);
    }

    #[test]
    fn runs_are_deterministic() {
        let params = scaled();
        let measure = || {
            let model = SacComposer::run(CsgKernel::new(), params, pair_layout(&params)).unwrap();
            let kernel = model.kernel();
            (
                kernel.volume(model.solid()).unwrap(),
                kernel.surface_area(model.solid()).unwrap(),
            )
        };
        let (v1, a1) = measure();
        let (v2, a2) = measure();
        assert_relative_eq!(v1, v2);
        assert_relative_eq!(a1, a2);
    }

    #[test]
    fn distant_placement_is_added_whole() {
        let params = scaled();
        let mut layout = pair_layout(&params);
        let far = AcinusPlacement::new(p(6.0, 0.0, 1.9), 1.0);
        layout.placements.push(far);
        let model = SacComposer::run(CsgKernel::new(), params, layout).unwrap();
        assert_eq!(model.report().isolated, vec![2]);
        let kernel = model.kernel();
        assert_eq!(
            kernel.classify(model.solid(), &p(6.0, 0.0, 1.9)).unwrap(),
            PointClassification::Inside
        );
    }

    #[test]
    fn zero_wall_is_rejected_before_building() {
        let params = scaled().with_wall_thickness(0.0);
        let result = SacComposer::new(CsgKernel::new(), params, pair_layout(&params));
        assert!(matches!(
            result,
            Err(AcinarError::Configuration(ConfigurationError::NonPositive {
                parameter: "wall_thickness",
                ..
            }))
        ));
    }

    #[test]
    fn single_placement_is_rejected() {
        let params = scaled();
        let mut layout = pair_layout(&params);
        layout.placements.truncate(1);
        assert!(matches!(
            SacComposer::new(CsgKernel::new(), params, layout),
            Err(AcinarError::Configuration(ConfigurationError::TooFewPlacements(1)))
        ));
    }

    #[test]
    fn states_advance_in_order() {
        let params = scaled();
        let mut composer =
            SacComposer::new(CsgKernel::new(), params, pair_layout(&params)).unwrap();
        assert_eq!(composer.state(), ComposerState::Empty);
        assert!(matches!(
            composer.step(),
            Err(AcinarError::Assembly(AssemblyError::InvalidState { state: "Empty", .. }))
        ));
        assert!(composer.finish().is_err());

        composer.seed().unwrap();
        assert_eq!(composer.state(), ComposerState::Seeded);
        assert!(composer.seed().is_err());

        assert_eq!(composer.step().unwrap(), ComposerState::Growing(1));
        assert!(composer.step().is_err());

        composer.finish().unwrap();
        assert_eq!(composer.state(), ComposerState::Final);
        assert!(composer.into_model().is_ok());
    }

    #[test]
    fn failed_trim_leaves_composer_failed() {
        // B's only neighbor is C, whose side of the wall misses the tube and A.
        let params = scaled();
        let layout = SacLayout::new(
            Tube::vertical(params.tube_length, params.tube_radius),
            vec![
                AcinusPlacement::new(p(0.0, 0.0, 1.9), 1.0),
                AcinusPlacement::new(p(5.0, 0.0, 1.9), 1.0),
                AcinusPlacement::new(p(6.5, 0.0, 1.9), 1.0),
            ],
        );
        let mut composer = SacComposer::new(CsgKernel::new(), params, layout).unwrap();
        composer.seed().unwrap();

        match composer.step() {
            Err(AcinarError::Assembly(AssemblyError::KernelFailure {
                stage,
                candidate,
                neighbor,
                ..
            })) => {
                assert_eq!(stage, "trim");
                assert_eq!(candidate, p(5.0, 0.0, 1.9));
                assert_eq!(neighbor, p(6.5, 0.0, 1.9));
            }
            other => panic!("unexpected step result: {other:?}"),
        }
        assert_eq!(composer.state(), ComposerState::Failed);
        assert!(composer.solid().is_empty());
        assert_eq!(composer.kernel().live_solids(), 0);

        assert!(matches!(
            composer.step(),
            Err(AcinarError::Assembly(AssemblyError::InvalidState { state: "Failed", .. }))
        ));
        assert!(composer.finish().is_err());
        assert!(composer.into_model().is_err());
    }

    #[test]
    fn unfinished_composer_has_no_model() {
        let params = scaled();
        let composer = SacComposer::new(CsgKernel::new(), params, pair_layout(&params)).unwrap();
        assert!(composer.into_model().is_err());
    }
}
