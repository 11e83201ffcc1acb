use crate::csg::{CsgNode, SolidData, SolidId, SolidStore};
use crate::error::Result;
use crate::geometry::{Cuboid, Primitive};
use crate::math::{Point3, Vector3};

/// Creates an axis-aligned box solid from an origin corner and a size.
///
/// Negative size components extend the box in the negative direction.
pub struct MakeBox {
    origin: Point3,
    size: Vector3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(origin: Point3, size: Vector3) -> Self {
        Self { origin, size }
    }

    /// Executes the operation, creating the box in the solid store.
    ///
    /// # Errors
    ///
    /// Returns an error if any size component is zero.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        let cuboid = Cuboid::new(self.origin, self.size)?;
        Ok(store.add_solid(SolidData::new(CsgNode::Primitive(Primitive::Cuboid(cuboid)))))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{BoundingBox, Volume};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_volume() {
        let mut store = SolidStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), Vector3::new(2.0, 3.0, 4.0))
            .execute(&mut store)
            .unwrap();

        let volume = Volume::new(solid).execute(&store).unwrap();
        assert!((volume - 24.0).abs() < 0.1, "expected 24.0, got {volume}");
    }

    #[test]
    fn complementary_box_extends_below() {
        let mut store = SolidStore::new();
        let solid = MakeBox::new(p(-1.0, -1.0, 0.0), Vector3::new(2.0, 2.0, -2.0))
            .execute(&mut store)
            .unwrap();

        let aabb = BoundingBox::new(solid).execute(&store).unwrap();
        assert!((aabb.min.z + 2.0).abs() < 1e-12);
        assert!(aabb.max.z.abs() < 1e-12);
    }
}
