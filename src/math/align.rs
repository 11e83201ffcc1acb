//! Rotation that carries the world z-axis onto a unit direction.
//!
//! Boxes and cylinders are built with their cutting face or axis along z and
//! then turned onto the bisector direction. The rotation axis is `z × d`,
//! which vanishes when `d` is (anti-)parallel to z, so both of those cases
//! get an explicit branch.

use std::f64::consts::PI;

use crate::error::GeometryError;

use super::{rotation_matrix, Matrix4, Point3, Vector3};

/// Below this norm the `z × d` axis is treated as vanished.
pub const AXIS_TOLERANCE: f64 = 1e-5;

/// Allowed deviation of an input direction from unit length.
const UNIT_TOLERANCE: f64 = 1e-6;

/// How to rotate the z-axis onto a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZAlignment {
    /// The direction already is +z.
    Identity,
    /// Rotate about `axis` (not necessarily unit) by `angle` radians.
    Rotation { axis: Vector3, angle: f64 },
}

impl ZAlignment {
    /// Returns the rotation as a matrix about the origin.
    #[must_use]
    pub fn matrix(&self) -> Matrix4 {
        match self {
            Self::Identity => Matrix4::identity(),
            Self::Rotation { axis, angle } => rotation_matrix(&axis.normalize(), *angle),
        }
    }

    /// Applies the rotation to a vector.
    #[must_use]
    pub fn apply(&self, v: &Vector3) -> Vector3 {
        self.matrix().transform_vector(v)
    }

    /// Applies the rotation about `pivot` to a point.
    #[must_use]
    pub fn apply_about(&self, pivot: &Point3, point: &Point3) -> Point3 {
        pivot + self.apply(&(point - pivot))
    }
}

/// Computes the rotation that takes `+z` to `direction`.
///
/// Three branches:
/// - general: axis `(-d.y, d.x, 0)`, angle `acos(d.z)`;
/// - parallel (`d ≈ +z`): identity;
/// - anti-parallel (`d ≈ -z`): half turn about the x-axis.
///
/// # Errors
///
/// Returns [`GeometryError::Alignment`] if `direction` is not finite or not
/// of unit length.
pub fn align_z_to(direction: &Vector3) -> Result<ZAlignment, GeometryError> {
    let d = direction;
    if !d.iter().all(|c| c.is_finite()) || (d.norm() - 1.0).abs() > UNIT_TOLERANCE {
        return Err(GeometryError::Alignment {
            direction: [d.x, d.y, d.z],
        });
    }

    let axis = Vector3::new(-d.y, d.x, 0.0);
    if axis.norm() > AXIS_TOLERANCE {
        return Ok(ZAlignment::Rotation {
            axis,
            angle: d.z.clamp(-1.0, 1.0).acos(),
        });
    }

    if d.z > 0.0 {
        Ok(ZAlignment::Identity)
    } else {
        Ok(ZAlignment::Rotation {
            axis: Vector3::x(),
            angle: PI,
        })
    }
}
