use crate::error::GeometryError;
use crate::geometry::Aabb;
use crate::math::{Point3, Vector3, TOLERANCE};

/// An axis-aligned solid box in its local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    min: Point3,
    max: Point3,
}

impl Cuboid {
    /// Creates a box spanning `origin` to `origin + size`.
    ///
    /// Size components may be negative; the box then extends in the negative
    /// direction from the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if any size component is zero or not finite.
    pub fn new(origin: Point3, size: Vector3) -> Result<Self, GeometryError> {
        if size
            .iter()
            .any(|s| !(s.abs() >= TOLERANCE && s.is_finite()))
        {
            return Err(GeometryError::Degenerate(
                "box size must be non-zero on every axis".into(),
            ));
        }
        let far = origin + size;
        Ok(Self {
            min: origin.inf(&far),
            max: origin.sup(&far),
        })
    }

    /// Signed distance, negative inside.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        let center = nalgebra::center(&self.min, &self.max);
        let half = (self.max - self.min) * 0.5;
        let q = (point - center).abs() - half;
        q.sup(&Vector3::zeros()).norm() + q.max().min(0.0)
    }

    /// Axis-aligned bounds.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.min,
            max: self.max,
        }
    }
}
