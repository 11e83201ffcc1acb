use crate::error::GeometryError;
use crate::geometry::Aabb;
use crate::math::{Point3, Vector3, TOLERANCE};

/// A finite solid cylinder.
///
/// The base disk is centered at `base`; the axis vector points to the top
/// disk and its length is the height.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    base: Point3,
    axis: Vector3,
    height: f64,
    radius: f64,
}

impl Cylinder {
    /// Creates a new cylinder.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or the axis vector is
    /// zero-length.
    pub fn new(base: Point3, axis: Vector3, radius: f64) -> Result<Self, GeometryError> {
        if !(radius >= TOLERANCE && radius.is_finite()) {
            return Err(GeometryError::Degenerate(
                "cylinder radius must be positive".into(),
            ));
        }
        let height = axis.norm();
        if !(height >= TOLERANCE && height.is_finite()) {
            return Err(GeometryError::ZeroVector);
        }
        Ok(Self {
            base,
            axis: axis / height,
            height,
            radius,
        })
    }

    /// Returns the base center.
    #[must_use]
    pub fn base(&self) -> &Point3 {
        &self.base
    }

    /// Returns the unit axis direction.
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed distance, negative inside.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        let rel = point - self.base;
        let t = rel.dot(&self.axis);
        let radial = (rel - self.axis * t).norm();

        let dr = radial - self.radius;
        let dh = (t - self.height * 0.5).abs() - self.height * 0.5;

        let outside = dr.max(0.0).hypot(dh.max(0.0));
        outside + dr.max(dh).min(0.0)
    }

    /// Axis-aligned bounds of both end disks.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let top = self.base + self.axis * self.height;
        // Half-extent of a disk of unit normal n along axis i is r * sqrt(1 - n_i^2).
        let extent = self
            .axis
            .map(|n| self.radius * (1.0 - n * n).max(0.0).sqrt());
        Aabb {
            min: self.base.inf(&top) - extent,
            max: self.base.sup(&top) + extent,
        }
    }
}
