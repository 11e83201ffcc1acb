use crate::error::GeometryError;
use crate::geometry::Aabb;
use crate::math::{Point3, TOLERANCE};

/// A solid ball.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    pub fn new(center: Point3, radius: f64) -> Result<Self, GeometryError> {
        if !(radius >= TOLERANCE && radius.is_finite()) {
            return Err(GeometryError::Degenerate(
                "sphere radius must be positive".into(),
            ));
        }
        Ok(Self { center, radius })
    }

    /// Returns the center.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed distance, negative inside.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.center).norm() - self.radius
    }

    /// Axis-aligned bounds.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::around(self.center, self.radius)
    }
}
