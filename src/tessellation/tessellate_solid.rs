use crate::csg::{CsgNode, SolidId, SolidStore};
use crate::error::{Result, TessellationError};
use crate::math::grid::SampleGrid;
use crate::math::{Point3, Vector3};

use super::{MeshParams, TriangleMesh};

/// Largest sampling grid a single tessellation may allocate.
const MAX_CELLS: usize = 32_000_000;

/// The 12 cell edges as pairs of corner offsets.
const CELL_EDGES: [([usize; 3], [usize; 3]); 12] = [
    ([0, 0, 0], [1, 0, 0]),
    ([0, 1, 0], [1, 1, 0]),
    ([0, 0, 1], [1, 0, 1]),
    ([0, 1, 1], [1, 1, 1]),
    ([0, 0, 0], [0, 1, 0]),
    ([1, 0, 0], [1, 1, 0]),
    ([0, 0, 1], [0, 1, 1]),
    ([1, 0, 1], [1, 1, 1]),
    ([0, 0, 0], [0, 0, 1]),
    ([1, 0, 0], [1, 0, 1]),
    ([0, 1, 0], [0, 1, 1]),
    ([1, 1, 0], [1, 1, 1]),
];

/// Tessellates the boundary of a solid into a closed triangle mesh.
///
/// Uses surface nets on a uniform grid: one vertex per cell that straddles
/// the surface, placed at the mean of the interpolated edge crossings, and
/// one quad per grid edge whose end points differ in sign. The cell size is
/// the maximum element size, raised to the minimum if needed.
pub struct TessellateSolid {
    solid: SolidId,
    params: MeshParams,
}

impl TessellateSolid {
    /// Creates a new `TessellateSolid` operation.
    #[must_use]
    pub fn new(solid: SolidId, params: MeshParams) -> Self {
        Self { solid, params }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the solid is missing
    /// or empty, or the grid would be too large.
    pub fn execute(&self, store: &SolidStore) -> Result<TriangleMesh> {
        self.params.validate()?;
        let node = &store.solid(self.solid)?.node;

        let aabb = node.aabb();
        if aabb.is_empty() {
            return Err(TessellationError::Failed("solid has no extent".into()).into());
        }
        let cell = self.params.max_size.max(self.params.min_size);
        let grid = SampleGrid::covering(&aabb.min, &aabb.max, cell, 1, MAX_CELLS)
            .map_err(|e| TessellationError::InvalidParameters(e.to_string()))?;

        let mesh = surface_nets(node, &grid);
        if mesh.indices.is_empty() {
            return Err(TessellationError::Failed("solid has no sampled surface".into()).into());
        }
        Ok(mesh)
    }
}

fn surface_nets(node: &CsgNode, grid: &SampleGrid) -> TriangleMesh {
    let [nx, ny, nz] = grid.dims();

    let mut values = vec![0.0; grid.node_count()];
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                values[grid.node_index(i, j, k)] = node.signed_distance(&grid.node(i, j, k));
            }
        }
    }
    let value = |c: [usize; 3]| values[grid.node_index(c[0], c[1], c[2])];

    let mut mesh = TriangleMesh::default();
    let mut cell_vertex: Vec<Option<u32>> = vec![None; grid.cell_count()];
    let eps = grid.cell_size() * 0.25;

    for (i, j, k) in grid.cells() {
        let mut sum = Vector3::zeros();
        let mut crossings = 0u32;
        for (a, b) in &CELL_EDGES {
            let ca = [i + a[0], j + a[1], k + a[2]];
            let cb = [i + b[0], j + b[1], k + b[2]];
            let (va, vb) = (value(ca), value(cb));
            if (va < 0.0) == (vb < 0.0) {
                continue;
            }
            let pa = grid.node(ca[0], ca[1], ca[2]);
            let pb = grid.node(cb[0], cb[1], cb[2]);
            let t = (va / (va - vb)).clamp(0.0, 1.0);
            sum += (pa + (pb - pa) * t).coords;
            crossings += 1;
        }
        if crossings == 0 {
            continue;
        }

        let position = Point3::from(sum / f64::from(crossings));
        #[allow(clippy::cast_possible_truncation)]
        let index = mesh.vertices.len() as u32;
        mesh.vertices.push(position);
        mesh.normals.push(gradient(node, &position, eps));
        cell_vertex[grid.cell_index(i, j, k)] = Some(index);
    }

    let dims = [nx, ny, nz];
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                let n0 = [i, j, k];
                for axis in 0..3 {
                    if n0[axis] >= dims[axis] {
                        continue;
                    }
                    let mut n1 = n0;
                    n1[axis] += 1;
                    let (v0, v1) = (value(n0), value(n1));
                    if (v0 < 0.0) == (v1 < 0.0) {
                        continue;
                    }
                    if let Some(quad) = edge_quad(grid, &cell_vertex, n0, axis) {
                        // Inside at the start means the outward normal is +axis.
                        let [q0, q1, q2, q3] = if v0 < 0.0 {
                            quad
                        } else {
                            [quad[3], quad[2], quad[1], quad[0]]
                        };
                        mesh.indices.push([q0, q1, q2]);
                        mesh.indices.push([q0, q2, q3]);
                    }
                }
            }
        }
    }

    mesh
}

/// The four cell vertices around a grid edge, counter-clockwise about the
/// edge's positive axis.
fn edge_quad(
    grid: &SampleGrid,
    cell_vertex: &[Option<u32>],
    n0: [usize; 3],
    axis: usize,
) -> Option<[u32; 4]> {
    let b = (axis + 1) % 3;
    let c = (axis + 2) % 3;
    let dims = grid.dims();
    if n0[b] == 0 || n0[c] == 0 || n0[b] > dims[b] - 1 || n0[c] > dims[c] - 1 {
        return None;
    }

    let mut out = [0u32; 4];
    for (slot, (db, dc)) in [(1, 1), (0, 1), (0, 0), (1, 0)].into_iter().enumerate() {
        let mut cell = n0;
        cell[b] -= db;
        cell[c] -= dc;
        out[slot] = cell_vertex[grid.cell_index(cell[0], cell[1], cell[2])]?;
    }
    Some(out)
}

fn gradient(node: &CsgNode, p: &Point3, eps: f64) -> Vector3 {
    let d = |v: Vector3| node.signed_distance(&(p + v)) - node.signed_distance(&(p - v));
    let g = Vector3::new(
        d(Vector3::x() * eps),
        d(Vector3::y() * eps),
        d(Vector3::z() * eps),
    );
    let len = g.norm();
    if len > 0.0 {
        g / len
    } else {
        Vector3::z()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::operations::creation::{MakeBox, MakeSphere};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn fine() -> MeshParams {
        MeshParams {
            min_size: 0.02,
            max_size: 0.05,
            dimension: 2,
        }
    }

    #[test]
    fn sphere_tessellates() {
        let mut store = SolidStore::new();
        let solid = MakeSphere::new(p(0.0, 0.0, 0.0), 1.0)
            .execute(&mut store)
            .unwrap();

        let mesh = TessellateSolid::new(solid, fine()).execute(&store).unwrap();
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
        for v in &mesh.vertices {
            assert!((v.coords.norm() - 1.0).abs() < 0.05);
        }
    }

    #[test]
    fn sphere_area_is_close() {
        let mut store = SolidStore::new();
        let solid = MakeSphere::new(p(0.0, 0.0, 0.0), 1.0)
            .execute(&mut store)
            .unwrap();

        let mesh = TessellateSolid::new(solid, fine()).execute(&store).unwrap();
        let expected = 4.0 * PI;
        let area = mesh.area();
        assert!((area - expected).abs() < expected * 0.08, "got {area}");
    }

    #[test]
    fn faces_point_outward() {
        let mut store = SolidStore::new();
        let solid = MakeSphere::new(p(0.0, 0.0, 0.0), 0.7)
            .execute(&mut store)
            .unwrap();

        let mesh = TessellateSolid::new(solid, fine()).execute(&store).unwrap();
        for tri in &mesh.indices {
            let [a, b, c] = tri.map(|i| mesh.vertices[i as usize]);
            let normal = (b - a).cross(&(c - a));
            if normal.norm() < 1e-12 {
                continue;
            }
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn box_tessellates() {
        let mut store = SolidStore::new();
        let solid = MakeBox::new(p(-0.5, -0.5, -0.5), Vector3::new(1.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();

        let mesh = TessellateSolid::new(solid, fine()).execute(&store).unwrap();
        assert!(!mesh.indices.is_empty());
        for v in &mesh.vertices {
            assert!(v.coords.amax() < 0.5 + 0.05);
        }
    }

    #[test]
    fn volume_dimension_is_rejected() {
        let mut store = SolidStore::new();
        let solid = MakeSphere::new(p(0.0, 0.0, 0.0), 1.0)
            .execute(&mut store)
            .unwrap();
        let params = MeshParams {
            dimension: 3,
            ..MeshParams::default()
        };
        assert!(TessellateSolid::new(solid, params).execute(&store).is_err());
    }
}
