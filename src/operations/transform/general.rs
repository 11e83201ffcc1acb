use crate::csg::{CsgNode, SolidId, SolidStore};
use crate::error::{OperationError, Result};
use crate::math::Matrix4;

/// Applies a rigid 4x4 transformation matrix to a solid.
pub struct GeneralTransform {
    solid: SolidId,
    matrix: Matrix4,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(solid: SolidId, matrix: Matrix4) -> Self {
        Self { solid, matrix }
    }

    /// Executes the transformation, modifying the solid in-place.
    ///
    /// The matrix must be rigid (rotation plus translation) so that distances
    /// inside the CSG tree stay valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing or the matrix is singular.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        let inverse = self.matrix.try_inverse().ok_or_else(|| {
            OperationError::InvalidInput("transform matrix is singular".into())
        })?;

        let data = store.solid_mut(self.solid)?;
        let node = std::mem::replace(&mut data.node, CsgNode::Union(Vec::new()));
        data.node = node.transformed(self.matrix, inverse);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeSphere;
    use crate::operations::query::BoundingBox;

    #[test]
    fn singular_matrix_fails() {
        let mut store = SolidStore::new();
        let solid = MakeSphere::new(Point3::origin(), 1.0)
            .execute(&mut store)
            .unwrap();
        let result = GeneralTransform::new(solid, Matrix4::zeros()).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn translation_moves_bounds() {
        let mut store = SolidStore::new();
        let solid = MakeSphere::new(Point3::origin(), 1.0)
            .execute(&mut store)
            .unwrap();
        let m = Matrix4::new_translation(&Vector3::new(0.0, 0.0, 5.0));
        GeneralTransform::new(solid, m).execute(&mut store).unwrap();

        let aabb = BoundingBox::new(solid).execute(&store).unwrap();
        assert!((aabb.min.z - 4.0).abs() < 1e-12);
    }
}
