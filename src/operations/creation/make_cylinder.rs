use crate::csg::{CsgNode, SolidData, SolidId, SolidStore};
use crate::error::Result;
use crate::geometry::{Cylinder, Primitive};
use crate::math::{Point3, Vector3};

/// Creates a cylinder solid from a base center, an axis vector and a radius.
///
/// The axis vector runs from the base disk to the top disk; its length is
/// the cylinder height.
pub struct MakeCylinder {
    base: Point3,
    axis: Vector3,
    radius: f64,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` operation.
    #[must_use]
    pub fn new(base: Point3, axis: Vector3, radius: f64) -> Self {
        Self { base, axis, radius }
    }

    /// Executes the operation, creating the cylinder in the solid store.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is near zero or the axis is degenerate.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        let cylinder = Cylinder::new(self.base, self.axis, self.radius)?;
        Ok(store.add_solid(SolidData::new(CsgNode::Primitive(Primitive::Cylinder(
            cylinder,
        )))))
    }
}
