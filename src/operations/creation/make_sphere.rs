use crate::csg::{CsgNode, SolidData, SolidId, SolidStore};
use crate::error::Result;
use crate::geometry::{Primitive, Sphere};
use crate::math::Point3;

/// Creates a sphere solid from center and radius.
pub struct MakeSphere {
    center: Point3,
    radius: f64,
}

impl MakeSphere {
    /// Creates a new `MakeSphere` operation.
    #[must_use]
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Executes the operation, creating the sphere in the solid store.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is near zero.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        let sphere = Sphere::new(self.center, self.radius)?;
        Ok(store.add_solid(SolidData::new(CsgNode::Primitive(Primitive::Sphere(sphere)))))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::BoundingBox;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn sphere_bounding_box() {
        let mut store = SolidStore::new();
        let solid = MakeSphere::new(p(0.0, 0.0, 0.0), 3.0)
            .execute(&mut store)
            .unwrap();

        let aabb = BoundingBox::new(solid).execute(&store).unwrap();
        assert!((aabb.min.z - (-3.0)).abs() < 1e-9);
        assert!((aabb.max.z - 3.0).abs() < 1e-9);
    }

    #[test]
    fn zero_radius_fails() {
        let mut store = SolidStore::new();
        let result = MakeSphere::new(p(0.0, 0.0, 0.0), 0.0).execute(&mut store);
        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
