use tracing::{debug, instrument};

use crate::error::{AssemblyError, Result};
use crate::kernel::GeometryKernel;
use crate::math::Point3;

use super::half_space::{BuildHalfSpaces, HalfSpacePair};
use super::params::SacParams;
use super::union_all::union_all;

/// A carved acinus and the region its neighbors own.
#[derive(Debug)]
pub struct Carved<R> {
    /// The sphere cut back behind every neighbor's wall.
    pub acinus: Vec<R>,
    /// Union of the neighbor-side half-spaces, `None` without neighbors.
    pub exclude: Option<Vec<R>>,
}

/// Cuts an acinus sphere back to its own side of every neighbor bisector.
///
/// Neighbors are processed in the order given. The keep half-space of each
/// one is intersected into the running solid and its exclude half-space is
/// collected; the excludes are united at the end.
pub struct CarveAcinus<R> {
    sphere: R,
    candidate: Point3,
    neighbors: Vec<Point3>,
    wall_thickness: f64,
    extent: f64,
}

impl<R> CarveAcinus<R> {
    /// Creates a carve of `sphere` centered at `candidate`.
    #[must_use]
    pub fn new(sphere: R, candidate: Point3, neighbors: Vec<Point3>, wall_thickness: f64) -> Self {
        Self {
            sphere,
            candidate,
            neighbors,
            wall_thickness,
            extent: SacParams::default().half_space_extent,
        }
    }

    /// Sets the half-space box extent.
    #[must_use]
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    /// Executes the carve, consuming the sphere.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::KernelFailure`] naming the pair if cutting
    /// against a neighbor leaves nothing, or any kernel error.
    #[instrument(skip_all, fields(candidate = ?self.candidate, neighbors = self.neighbors.len()))]
    pub fn execute<K>(self, kernel: &mut K) -> Result<Carved<R>>
    where
        K: GeometryKernel<Region = R>,
    {
        let mut acinus = vec![self.sphere];
        let mut excludes = Vec::with_capacity(self.neighbors.len());

        for neighbor in &self.neighbors {
            let HalfSpacePair { keep, exclude } =
                BuildHalfSpaces::new(self.candidate, *neighbor, self.wall_thickness)
                    .with_extent(self.extent)
                    .execute(kernel)?;
            acinus = kernel.intersect(acinus, vec![keep])?;
            if acinus.is_empty() || kernel.is_empty(&acinus)? {
                excludes.push(exclude);
                excludes.append(&mut acinus);
                kernel.discard(excludes)?;
                return Err(AssemblyError::KernelFailure {
                    stage: "carve",
                    candidate: self.candidate,
                    neighbor: *neighbor,
                    reason: "nothing left on the acinus side of the wall".into(),
                }
                .into());
            }
            debug!(neighbor = ?neighbor, "cut against neighbor");
            excludes.push(exclude);
        }

        let exclude = if excludes.is_empty() {
            None
        } else {
            Some(union_all(kernel, excludes)?)
        };
        Ok(Carved { acinus, exclude })
    }
}
