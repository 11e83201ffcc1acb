mod cuboid;
mod cylinder;
mod sphere;

pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use sphere::Sphere;

use crate::math::Point3;

use super::Aabb;

/// An exact solid primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Cylinder(Cylinder),
    Cuboid(Cuboid),
}

impl Primitive {
    /// Signed distance from `point` to the primitive surface, negative inside.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        match self {
            Self::Sphere(s) => s.signed_distance(point),
            Self::Cylinder(c) => c.signed_distance(point),
            Self::Cuboid(b) => b.signed_distance(point),
        }
    }

    /// Conservative axis-aligned bounds.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        match self {
            Self::Sphere(s) => s.aabb(),
            Self::Cylinder(c) => c.aabb(),
            Self::Cuboid(b) => b.aabb(),
        }
    }
}
