//! Seams between the sac builder and the solid modelling backend.
//!
//! The builder only talks to [`GeometryKernel`] and [`MeshingEngine`];
//! [`CsgKernel`] is the in-process implementation.

mod csg_kernel;

pub use csg_kernel::{CsgKernel, Region};

use crate::error::Result;
use crate::math::align::ZAlignment;
use crate::math::{Point3, Vector3};
use crate::tessellation::{MeshParams, TriangleMesh};

/// Primitive construction, rigid transforms and booleans over solid regions.
///
/// Boolean operations consume their input handles and return new ones;
/// transforms modify a region in place.
pub trait GeometryKernel {
    /// Handle to a solid owned by the kernel.
    type Region;

    /// Adds a sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    fn add_sphere(&mut self, center: Point3, radius: f64) -> Result<Self::Region>;

    /// Adds a cylinder whose axis vector runs from the base center to the
    /// top center.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or the axis is zero.
    fn add_cylinder(&mut self, base: Point3, axis: Vector3, radius: f64) -> Result<Self::Region>;

    /// Adds an axis-aligned box spanning `origin` to `origin + size`.
    ///
    /// # Errors
    ///
    /// Returns an error if any size component is zero.
    fn add_box(&mut self, origin: Point3, size: Vector3) -> Result<Self::Region>;

    /// Rotates a region about the line through `pivot` along `axis`.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis is zero or the region is unknown.
    fn rotate(&mut self, region: &Self::Region, pivot: Point3, axis: Vector3, angle: f64)
        -> Result<()>;

    /// Translates a region.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is unknown.
    fn translate(&mut self, region: &Self::Region, vector: Vector3) -> Result<()>;

    /// Intersects the union of `objects` with the union of `tools`.
    /// An empty result yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if either list is empty or names an unknown region.
    fn intersect(
        &mut self,
        objects: Vec<Self::Region>,
        tools: Vec<Self::Region>,
    ) -> Result<Vec<Self::Region>>;

    /// Unites `objects` with `tools`.
    ///
    /// # Errors
    ///
    /// Returns an error if either list is empty or names an unknown region.
    fn fuse(&mut self, objects: Vec<Self::Region>, tools: Vec<Self::Region>)
        -> Result<Vec<Self::Region>>;

    /// Splits `objects` and `tools` against each other, keeping all material.
    ///
    /// # Errors
    ///
    /// Returns an error if either list is empty or names an unknown region.
    fn fragment(
        &mut self,
        objects: Vec<Self::Region>,
        tools: Vec<Self::Region>,
    ) -> Result<Vec<Self::Region>>;

    /// Returns `true` if the regions enclose no volume.
    ///
    /// # Errors
    ///
    /// Returns an error if a region is unknown.
    fn is_empty(&self, regions: &[Self::Region]) -> Result<bool>;

    /// Releases regions that will not be used again.
    ///
    /// # Errors
    ///
    /// Returns an error if a region is unknown.
    fn discard(&mut self, regions: Vec<Self::Region>) -> Result<()>;

    /// Turns a region built along +z onto a direction, about `pivot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rotation fails.
    fn align(
        &mut self,
        region: &Self::Region,
        pivot: Point3,
        alignment: &ZAlignment,
    ) -> Result<()> {
        match alignment {
            ZAlignment::Identity => Ok(()),
            ZAlignment::Rotation { axis, angle } => self.rotate(region, pivot, *axis, *angle),
        }
    }
}

/// Turns a finished solid into a discretized mesh.
pub trait MeshingEngine: GeometryKernel {
    /// Meshes the union of `regions`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid parameters or an unmeshable solid.
    fn generate_mesh(&self, regions: &[Self::Region], params: &MeshParams) -> Result<TriangleMesh>;
}
