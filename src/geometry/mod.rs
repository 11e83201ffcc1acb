pub mod aabb;
pub mod primitive;

pub use aabb::Aabb;
pub use primitive::{Cuboid, Cylinder, Primitive, Sphere};
