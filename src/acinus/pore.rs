use tracing::{debug, instrument};

use crate::error::{AssemblyError, Result};
use crate::kernel::GeometryKernel;
use crate::math::{Point3, Vector3};

use super::half_space::Bisector;

/// Opens a pore through the wall toward every neighbor of a carved acinus.
///
/// Each pore is a cylinder of the wall's height spanning the gap between
/// the two half-spaces, aligned with the bisector normal. Its end caps lie
/// on the wall faces, where the kernel's union merges them with the
/// material on either side. The acinus is fragmented with it, so both the
/// acinus material and the channel survive.
pub struct AddPoreChannels<R> {
    acinus: Vec<R>,
    candidate: Point3,
    neighbors: Vec<Point3>,
    wall_thickness: f64,
    pore_radius: f64,
}

impl<R> AddPoreChannels<R> {
    /// Creates the pass for a carved acinus centered at `candidate`.
    #[must_use]
    pub fn new(
        acinus: Vec<R>,
        candidate: Point3,
        neighbors: Vec<Point3>,
        wall_thickness: f64,
        pore_radius: f64,
    ) -> Self {
        Self {
            acinus,
            candidate,
            neighbors,
            wall_thickness,
            pore_radius,
        }
    }

    /// Executes the pass, returning the acinus pieces plus channels.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::KernelFailure`] if a fragment returns no
    /// pieces, or any kernel error.
    #[instrument(skip_all, fields(candidate = ?self.candidate, pores = self.neighbors.len()))]
    pub fn execute<K>(self, kernel: &mut K) -> Result<Vec<R>>
    where
        K: GeometryKernel<Region = R>,
    {
        let mut acinus = self.acinus;
        for neighbor in &self.neighbors {
            let bisector = Bisector::new(&self.candidate, neighbor)?;
            let base = bisector.midpoint - bisector.direction * (self.wall_thickness / 2.0);
            let channel = kernel.add_cylinder(
                base,
                Vector3::new(0.0, 0.0, self.wall_thickness),
                self.pore_radius,
            )?;
            kernel.align(&channel, base, &bisector.alignment)?;

            acinus = kernel.fragment(acinus, vec![channel])?;
            if acinus.is_empty() {
                return Err(AssemblyError::KernelFailure {
                    stage: "pore",
                    candidate: self.candidate,
                    neighbor: *neighbor,
                    reason: "fragment returned no pieces".into(),
                }
                .into());
            }
            debug!(neighbor = ?neighbor, pieces = acinus.len(), "opened pore");
        }
        Ok(acinus)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::acinus::carve::CarveAcinus;
    use crate::kernel::CsgKernel;
    use crate::operations::boolean::PointClassification;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn pore_bridges_the_wall() {
        let mut kernel = CsgKernel::new();
        let candidate = p(0.0, 0.0, 0.0);
        let neighbor = p(1.5, 0.0, 0.0);
        let sphere = kernel.add_sphere(candidate, 1.0).unwrap();
        let carved = CarveAcinus::new(sphere, candidate, vec![neighbor], 0.2)
            .with_extent(20.0)
            .execute(&mut kernel)
            .unwrap();

        let before = kernel
            .classify(&carved.acinus, &p(0.75, 0.0, 0.0))
            .unwrap();
        assert_eq!(before, PointClassification::Outside);

        let channeled = AddPoreChannels::new(carved.acinus, candidate, vec![neighbor], 0.2, 0.2)
            .execute(&mut kernel)
            .unwrap();
        let at = |point: Point3| kernel.classify(&channeled, &point).unwrap();
        // The channel fills the wall from x = 0.65 to x = 0.85.
        assert_eq!(at(p(0.75, 0.0, 0.0)), PointClassification::Inside);
        assert_eq!(at(p(0.8, 0.1, 0.1)), PointClassification::Inside);
        assert_eq!(at(p(0.75, 0.3, 0.0)), PointClassification::Outside);
        assert_eq!(at(p(0.0, 0.0, 0.0)), PointClassification::Inside);
        assert_eq!(at(p(0.9, 0.0, 0.0)), PointClassification::Outside);
    }

    #[test]
    fn pore_axis_is_continuous_across_both_faces() {
        let mut kernel = CsgKernel::new();
        let candidate = p(0.0, 0.0, 0.0);
        let neighbor = p(1.5, 0.0, 0.0);
        let sphere = kernel.add_sphere(candidate, 1.0).unwrap();
        let carved = CarveAcinus::new(sphere, candidate, vec![neighbor], 0.2)
            .with_extent(20.0)
            .execute(&mut kernel)
            .unwrap();
        let channeled = AddPoreChannels::new(carved.acinus, candidate, vec![neighbor], 0.2, 0.2)
            .execute(&mut kernel)
            .unwrap();

        for i in 0..=84 {
            let x = f64::from(i) * 0.01;
            assert_eq!(
                kernel.classify(&channeled, &p(x, 0.0, 0.0)).unwrap(),
                PointClassification::Inside,
                "gap in the channel at x = {x}"
            );
        }
        for face in [0.65, 0.85] {
            assert_eq!(
                kernel.classify(&channeled, &p(face, 0.1, 0.0)).unwrap(),
                PointClassification::Inside,
                "wall face at x = {face}"
            );
        }
        assert_eq!(kernel.components(&channeled).unwrap(), 1);
    }

    #[test]
    fn vertical_pore_follows_half_turn() {
        let mut kernel = CsgKernel::new();
        let candidate = p(0.0, 0.0, 0.0);
        let neighbor = p(0.0, 0.0, 1.5);
        let sphere = kernel.add_sphere(candidate, 1.0).unwrap();
        let channeled = AddPoreChannels::new(vec![sphere], candidate, vec![neighbor], 0.2, 0.2)
            .execute(&mut kernel)
            .unwrap();
        // Cylinder from z = 0.85 down to z = 0.65, inside the sphere.
        assert_eq!(
            kernel.classify(&channeled, &p(0.0, 0.0, 0.75)).unwrap(),
            PointClassification::Inside
        );
        assert!(kernel.volume(&channeled).unwrap() > 0.0);
    }

    #[test]
    fn no_neighbors_is_a_no_op() {
        let mut kernel = CsgKernel::new();
        let sphere = kernel.add_sphere(p(0.0, 0.0, 0.0), 1.0).unwrap();
        let id = sphere.id();
        let out = AddPoreChannels::new(vec![sphere], p(0.0, 0.0, 0.0), Vec::new(), 0.2, 0.2)
            .execute(&mut kernel)
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id(), id);
    }
}
