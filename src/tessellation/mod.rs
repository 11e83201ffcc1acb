mod tessellate_solid;

pub use tessellate_solid::TessellateSolid;

use crate::error::TessellationError;
use crate::math::{Point3, Vector3};

/// Parameters handed to the meshing engine.
///
/// Element sizes bound the edge length of generated triangles; `dimension`
/// selects surface (2) or volume (3) meshing.
#[derive(Debug, Clone, Copy)]
pub struct MeshParams {
    /// Minimum element size.
    pub min_size: f64,
    /// Maximum element size.
    pub max_size: f64,
    /// Target mesh dimension.
    pub dimension: u8,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            min_size: 0.05,
            max_size: 0.1,
            dimension: 2,
        }
    }
}

impl MeshParams {
    /// Checks the sizes and dimension.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive or inverted sizes, and for any
    /// dimension other than 2.
    pub fn validate(&self) -> Result<(), TessellationError> {
        if !(self.min_size > 0.0 && self.min_size.is_finite()) {
            return Err(TessellationError::InvalidParameters(format!(
                "minimum element size must be positive, got {}",
                self.min_size
            )));
        }
        if !(self.max_size >= self.min_size && self.max_size.is_finite()) {
            return Err(TessellationError::InvalidParameters(format!(
                "maximum element size {} is below the minimum {}",
                self.max_size, self.min_size
            )));
        }
        match self.dimension {
            2 => Ok(()),
            3 => Err(TessellationError::InvalidParameters(
                "volume meshing is not supported".into(),
            )),
            d => Err(TessellationError::InvalidParameters(format!(
                "mesh dimension must be 2 or 3, got {d}"
            ))),
        }
    }
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Total area of all triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.indices
            .iter()
            .map(|tri| {
                let v0 = self.vertices[tri[0] as usize];
                let v1 = self.vertices[tri[1] as usize];
                let v2 = self.vertices[tri[2] as usize];
                (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(MeshParams::default().validate().is_ok());
    }

    #[test]
    fn inverted_sizes_fail() {
        let params = MeshParams {
            min_size: 0.2,
            max_size: 0.1,
            dimension: 2,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn volume_dimension_fails() {
        let params = MeshParams {
            dimension: 3,
            ..MeshParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn single_triangle_area() {
        let mesh = TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            ],
            normals: vec![Vector3::z(); 3],
            indices: vec![[0, 1, 2]],
        };
        assert!((mesh.area() - 2.0).abs() < 1e-12);
    }
}
