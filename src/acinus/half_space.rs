use crate::error::{GeometryError, Result};
use crate::kernel::GeometryKernel;
use crate::math::align::{align_z_to, ZAlignment};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::params::SacParams;

/// The plane halfway between two acinus centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisector {
    /// Point halfway between the centers.
    pub midpoint: Point3,
    /// Unit normal pointing from the neighbor toward the candidate.
    pub direction: Vector3,
    /// Rotation carrying +z onto `direction`.
    pub alignment: ZAlignment,
}

impl Bisector {
    /// Builds the bisector of `candidate` and `neighbor`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the centers coincide, or
    /// [`GeometryError::Alignment`] if the direction is not finite.
    pub fn new(candidate: &Point3, neighbor: &Point3) -> Result<Self> {
        let delta = candidate - neighbor;
        let len = delta.norm();
        if len < TOLERANCE {
            return Err(
                GeometryError::Degenerate("acinus and neighbor centers coincide".into()).into(),
            );
        }
        let direction = delta / len;
        Ok(Self {
            midpoint: nalgebra::center(candidate, neighbor),
            direction,
            alignment: align_z_to(&direction)?,
        })
    }

    /// Signed distance of `point` from the plane, positive on the candidate
    /// side.
    #[must_use]
    pub fn signed_offset(&self, point: &Point3) -> f64 {
        (point - self.midpoint).dot(&self.direction)
    }
}

/// The two sides of a wall between an acinus and one neighbor.
#[derive(Debug)]
pub struct HalfSpacePair<R> {
    /// Material on the candidate side, offset half a wall from the bisector.
    pub keep: R,
    /// Material on the neighbor side, offset half a wall the other way.
    pub exclude: R,
}

/// Builds the keep/exclude half-spaces between a candidate acinus and one
/// neighbor.
///
/// Each half-space is a box of half edge `extent` whose face lies in the
/// z = 0 plane. It is turned onto the bisector normal about the origin and
/// moved so the face sits half a wall thickness off the bisector. The keep
/// box grows along the normal, the exclude box against it, leaving a slab
/// of exactly `wall_thickness` between them.
pub struct BuildHalfSpaces {
    candidate: Point3,
    neighbor: Point3,
    wall_thickness: f64,
    extent: f64,
}

impl BuildHalfSpaces {
    /// Creates the operation with the default box extent.
    #[must_use]
    pub fn new(candidate: Point3, neighbor: Point3, wall_thickness: f64) -> Self {
        Self {
            candidate,
            neighbor,
            wall_thickness,
            extent: SacParams::default().half_space_extent,
        }
    }

    /// Sets the half edge length of the boxes.
    #[must_use]
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    /// Creates both half-spaces in the kernel.
    ///
    /// # Errors
    ///
    /// Returns an error if the centers coincide or a kernel call fails.
    pub fn execute<K: GeometryKernel>(&self, kernel: &mut K) -> Result<HalfSpacePair<K::Region>> {
        let bisector = Bisector::new(&self.candidate, &self.neighbor)?;
        let half_wall = bisector.direction * (self.wall_thickness / 2.0);

        let keep = self.face_box(kernel, &bisector, 1.0)?;
        kernel.translate(&keep, (bisector.midpoint + half_wall).coords)?;

        let exclude = self.face_box(kernel, &bisector, -1.0)?;
        kernel.translate(&exclude, (bisector.midpoint - half_wall).coords)?;

        Ok(HalfSpacePair { keep, exclude })
    }

    /// A box with one face on z = 0 extending toward `sign * z`, aligned to
    /// the bisector normal.
    fn face_box<K: GeometryKernel>(
        &self,
        kernel: &mut K,
        bisector: &Bisector,
        sign: f64,
    ) -> Result<K::Region> {
        let s = self.extent;
        let region = kernel.add_box(
            Point3::new(-s, -s, 0.0),
            Vector3::new(2.0 * s, 2.0 * s, sign * 2.0 * s),
        )?;
        kernel.align(&region, Point3::origin(), &bisector.alignment)?;
        Ok(region)
    }
}
