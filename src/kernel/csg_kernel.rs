use tracing::trace;

use crate::csg::{CsgNode, SolidData, SolidId, SolidStore};
use crate::error::{OperationError, Result};
use crate::geometry::Aabb;
use crate::math::{Point3, Vector3};
use crate::operations::boolean::{
    classify_point_in_solid, Fragment, Fuse, Intersect, PointClassification,
};
use crate::operations::creation::{MakeBox, MakeCylinder, MakeSphere};
use crate::operations::query::{
    BoundingBox, Components, IsEmpty, SamplingParams, SurfaceArea, Volume,
};
use crate::operations::transform::{Rotate, Translate};
use crate::tessellation::{MeshParams, TessellateSolid, TriangleMesh};

use super::{GeometryKernel, MeshingEngine};

/// Handle to a solid in a [`CsgKernel`].
///
/// Not `Clone`: booleans take handles by value, so a consumed handle cannot
/// be used again.
#[derive(Debug, PartialEq, Eq)]
pub struct Region(SolidId);

impl Region {
    /// The underlying store id.
    #[must_use]
    pub fn id(&self) -> SolidId {
        self.0
    }
}

/// In-process geometry kernel over a CSG solid store.
///
/// Point membership is exact; emptiness, volume and connectivity are
/// sampled on a grid set by [`SamplingParams`].
#[derive(Debug, Default)]
pub struct CsgKernel {
    store: SolidStore,
    sampling: SamplingParams,
}

impl CsgKernel {
    /// Creates a kernel with default sampling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sampling used by emptiness checks and queries.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &SolidStore {
        &self.store
    }

    /// Number of live solids.
    #[must_use]
    pub fn live_solids(&self) -> usize {
        self.store.len()
    }

    /// Classifies a point against the union of `regions`.
    ///
    /// # Errors
    ///
    /// Returns an error if a region is unknown or the list is empty.
    pub fn classify(&self, regions: &[Region], point: &Point3) -> Result<PointClassification> {
        let (store, id) = self.merged(regions)?;
        classify_point_in_solid(point, id, &store)
    }

    /// Sampled volume of the union of `regions`.
    ///
    /// # Errors
    ///
    /// Returns an error if a region is unknown or the grid is too large.
    pub fn volume(&self, regions: &[Region]) -> Result<f64> {
        let (store, id) = self.merged(regions)?;
        Volume::new(id).with_params(self.sampling).execute(&store)
    }

    /// Number of connected components of the union of `regions`.
    ///
    /// # Errors
    ///
    /// Returns an error if a region is unknown or the grid is too large.
    pub fn components(&self, regions: &[Region]) -> Result<usize> {
        let (store, id) = self.merged(regions)?;
        Components::new(id)
            .with_params(self.sampling)
            .execute(&store)
    }

    /// Surface area of the union of `regions`, from a mesh at the sampling
    /// cell size.
    ///
    /// # Errors
    ///
    /// Returns an error if a region is unknown or cannot be tessellated.
    pub fn surface_area(&self, regions: &[Region]) -> Result<f64> {
        let params = MeshParams {
            min_size: self.sampling.cell_size,
            max_size: self.sampling.cell_size,
            dimension: 2,
        };
        let (store, id) = self.merged(regions)?;
        SurfaceArea::new(id).with_params(params).execute(&store)
    }

    /// Conservative bounds of the union of `regions`.
    ///
    /// # Errors
    ///
    /// Returns an error if a region is unknown or the list is empty.
    pub fn bounds(&self, regions: &[Region]) -> Result<Aabb> {
        let (store, id) = self.merged(regions)?;
        BoundingBox::new(id).execute(&store)
    }

    /// Copies the union of `regions` into a scratch store.
    fn merged(&self, regions: &[Region]) -> Result<(SolidStore, SolidId)> {
        if regions.is_empty() {
            return Err(OperationError::InvalidInput("region list is empty".into()).into());
        }
        let nodes = regions
            .iter()
            .map(|r| Ok(self.store.solid(r.0)?.node.clone()))
            .collect::<Result<Vec<_>>>()?;
        let mut scratch = SolidStore::new();
        let id = scratch.add_solid(SolidData::new(CsgNode::union_of(nodes)));
        Ok((scratch, id))
    }
}

fn ids(regions: Vec<Region>) -> Vec<SolidId> {
    regions.into_iter().map(|r| r.0).collect()
}

impl GeometryKernel for CsgKernel {
    type Region = Region;

    fn add_sphere(&mut self, center: Point3, radius: f64) -> Result<Region> {
        MakeSphere::new(center, radius)
            .execute(&mut self.store)
            .map(Region)
    }

    fn add_cylinder(&mut self, base: Point3, axis: Vector3, radius: f64) -> Result<Region> {
        MakeCylinder::new(base, axis, radius)
            .execute(&mut self.store)
            .map(Region)
    }

    fn add_box(&mut self, origin: Point3, size: Vector3) -> Result<Region> {
        MakeBox::new(origin, size)
            .execute(&mut self.store)
            .map(Region)
    }

    fn rotate(&mut self, region: &Region, pivot: Point3, axis: Vector3, angle: f64) -> Result<()> {
        Rotate::new(region.0, pivot, axis, angle).execute(&mut self.store)
    }

    fn translate(&mut self, region: &Region, vector: Vector3) -> Result<()> {
        Translate::new(region.0, vector).execute(&mut self.store)
    }

    fn intersect(&mut self, objects: Vec<Region>, tools: Vec<Region>) -> Result<Vec<Region>> {
        let id = Intersect::new(ids(objects), ids(tools)).execute(&mut self.store)?;
        if IsEmpty::new(id)
            .with_params(self.sampling)
            .execute(&self.store)?
        {
            trace!("intersection is empty");
            self.store.take_solid(id)?;
            return Ok(Vec::new());
        }
        Ok(vec![Region(id)])
    }

    fn fuse(&mut self, objects: Vec<Region>, tools: Vec<Region>) -> Result<Vec<Region>> {
        let id = Fuse::new(ids(objects), ids(tools)).execute(&mut self.store)?;
        trace!(primitives = self.store.solid(id)?.node.primitive_count(), "fused");
        Ok(vec![Region(id)])
    }

    fn fragment(&mut self, objects: Vec<Region>, tools: Vec<Region>) -> Result<Vec<Region>> {
        let pieces = Fragment::new(ids(objects), ids(tools))
            .with_params(self.sampling)
            .execute(&mut self.store)?;
        trace!(pieces = pieces.len(), "fragmented");
        Ok(pieces.into_iter().map(Region).collect())
    }

    fn is_empty(&self, regions: &[Region]) -> Result<bool> {
        for region in regions {
            if !IsEmpty::new(region.0)
                .with_params(self.sampling)
                .execute(&self.store)?
            {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn discard(&mut self, regions: Vec<Region>) -> Result<()> {
        for region in regions {
            self.store.take_solid(region.0)?;
        }
        Ok(())
    }
}

impl MeshingEngine for CsgKernel {
    fn generate_mesh(&self, regions: &[Region], params: &MeshParams) -> Result<TriangleMesh> {
        let (store, id) = self.merged(regions)?;
        TessellateSolid::new(id, *params).execute(&store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::math::align::align_z_to;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn empty_intersection_returns_nothing() {
        let mut kernel = CsgKernel::new();
        let a = kernel.add_sphere(p(0.0, 0.0, 0.0), 1.0).unwrap();
        let b = kernel.add_sphere(p(3.0, 0.0, 0.0), 1.0).unwrap();

        let result = kernel.intersect(vec![a], vec![b]).unwrap();
        assert!(result.is_empty());
        assert_eq!(kernel.live_solids(), 0);
    }

    #[test]
    fn fuse_yields_one_region() {
        let mut kernel = CsgKernel::new();
        let a = kernel.add_sphere(p(0.0, 0.0, 0.0), 1.0).unwrap();
        let b = kernel.add_sphere(p(1.0, 0.0, 0.0), 1.0).unwrap();

        let fused = kernel.fuse(vec![a], vec![b]).unwrap();
        assert_eq!(fused.len(), 1);
        assert_eq!(kernel.components(&fused).unwrap(), 1);
    }

    #[test]
    fn align_turns_cylinder_onto_direction() {
        let mut kernel = CsgKernel::new();
        let rod = kernel
            .add_cylinder(p(1.0, 1.0, 1.0), Vector3::new(0.0, 0.0, 1.0), 0.1)
            .unwrap();
        let alignment = align_z_to(&Vector3::x()).unwrap();
        kernel.align(&rod, p(1.0, 1.0, 1.0), &alignment).unwrap();

        let regions = [rod];
        assert_eq!(
            kernel.classify(&regions, &p(1.9, 1.0, 1.0)).unwrap(),
            PointClassification::Inside
        );
        assert_eq!(
            kernel.classify(&regions, &p(1.0, 1.0, 1.9)).unwrap(),
            PointClassification::Outside
        );
    }

    #[test]
    fn queries_on_sphere() {
        let mut kernel = CsgKernel::new();
        let ball = kernel.add_sphere(p(0.0, 0.0, 0.0), 1.0).unwrap();
        let regions = [ball];

        let volume = kernel.volume(&regions).unwrap();
        let area = kernel.surface_area(&regions).unwrap();
        assert!((volume - 4.0 / 3.0 * PI).abs() < 0.1);
        assert!((area - 4.0 * PI).abs() < 1.0);
        assert!(!kernel.is_empty(&regions).unwrap());

        let bounds = kernel.bounds(&regions).unwrap();
        assert!((bounds.max.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn discard_frees_regions() {
        let mut kernel = CsgKernel::new();
        let a = kernel.add_sphere(p(0.0, 0.0, 0.0), 1.0).unwrap();
        let b = kernel
            .add_box(p(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0))
            .unwrap();
        let stale = a.id();
        assert_eq!(kernel.live_solids(), 2);

        kernel.discard(vec![a, b]).unwrap();
        assert_eq!(kernel.live_solids(), 0);
        assert!(kernel.store().solid(stale).is_err());
    }

    #[test]
    fn empty_region_list_is_rejected() {
        let kernel = CsgKernel::new();
        assert!(kernel.volume(&[]).is_err());
        assert!(kernel.is_empty(&[]).unwrap());
    }
}
