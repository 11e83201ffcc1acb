use crate::error::ConfigurationError;
use crate::geometry::Aabb;
use crate::math::{Point3, Vector3};

use super::params::{check_pore, ensure_positive, SacParams};

/// Where one acinus goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcinusPlacement {
    /// Center of the acinus sphere.
    pub center: Point3,
    /// Radius of the acinus sphere.
    pub radius: f64,
    /// Pore radius for channels cut from this acinus; falls back to
    /// [`SacParams::pore_radius`].
    pub pore_radius: Option<f64>,
}

impl AcinusPlacement {
    /// Creates a placement without its own pore radius.
    #[must_use]
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius,
            pore_radius: None,
        }
    }

    /// Sets the pore radius used for this acinus' channels.
    #[must_use]
    pub fn with_pore_radius(mut self, pore_radius: f64) -> Self {
        self.pore_radius = Some(pore_radius);
        self
    }

    /// Pore radius in effect for this placement.
    #[must_use]
    pub fn effective_pore_radius(&self, params: &SacParams) -> f64 {
        self.pore_radius.unwrap_or(params.pore_radius)
    }
}

/// The airway tube the first acinus sits on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    /// Center of the tube's base disk.
    pub base: Point3,
    /// Vector from base to top; its length is the tube length.
    pub axis: Vector3,
    /// Tube radius.
    pub radius: f64,
}

impl Tube {
    /// Tube along +z from the origin.
    #[must_use]
    pub fn vertical(length: f64, radius: f64) -> Self {
        Self {
            base: Point3::origin(),
            axis: Vector3::new(0.0, 0.0, length),
            radius,
        }
    }
}

/// A tube plus the ordered acinus placements.
///
/// The first placement is fused with the tube; each later one is carved
/// into the growing structure in list order.
#[derive(Debug, Clone, PartialEq)]
pub struct SacLayout {
    /// The airway tube.
    pub tube: Tube,
    /// Acini in placement order.
    pub placements: Vec<AcinusPlacement>,
}

impl SacLayout {
    /// Creates a layout from explicit parts.
    #[must_use]
    pub fn new(tube: Tube, placements: Vec<AcinusPlacement>) -> Self {
        Self { tube, placements }
    }

    /// The four-acinus bottom-up layout.
    ///
    /// The central acinus rests on the tube end so that the tube rim lies on
    /// its surface; "bottom" sits `2 * overlap * r` further along the tube
    /// axis and "right"/"left" sit `± lateral * r` sideways at half that
    /// height.
    #[must_use]
    pub fn bottom_up(params: &SacParams) -> Self {
        let r = params.acinus_radius;
        let z_shift = (r * r - params.tube_radius * params.tube_radius)
            .max(0.0)
            .sqrt();
        let z0 = params.tube_length + z_shift;
        let axial = params.overlap_factor * r;
        let lateral = params.overlap_factor_lateral * r;

        let centers = [
            Point3::new(0.0, 0.0, z0),
            Point3::new(0.0, 0.0, z0 + 2.0 * axial),
            Point3::new(lateral, 0.0, z0 + axial),
            Point3::new(-lateral, 0.0, z0 + axial),
        ];

        Self {
            tube: Tube::vertical(params.tube_length, params.tube_radius),
            placements: centers
                .into_iter()
                .map(|c| AcinusPlacement::new(c, r))
                .collect(),
        }
    }

    /// Placement centers in order.
    #[must_use]
    pub fn centers(&self) -> Vec<Point3> {
        self.placements.iter().map(|p| p.center).collect()
    }

    /// Bounding box of the tube and all acinus spheres.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let top = self.tube.base + self.tube.axis;
        let tube = Aabb::around(self.tube.base, self.tube.radius)
            .union(&Aabb::around(top, self.tube.radius));
        self.placements
            .iter()
            .fold(tube, |acc, p| acc.union(&Aabb::around(p.center, p.radius)))
    }

    /// Checks the layout against a parameter set.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two placements, a placement
    /// has an invalid radius or pore radius, or the half-space boxes do not
    /// cover the model.
    pub fn validate(&self, params: &SacParams) -> Result<(), ConfigurationError> {
        if self.placements.len() < 2 {
            return Err(ConfigurationError::TooFewPlacements(self.placements.len()));
        }
        ensure_positive("tube.radius", self.tube.radius)?;
        ensure_positive("tube.length", self.tube.axis.norm())?;
        for placement in &self.placements {
            ensure_positive("placement.radius", placement.radius)?;
            if let Some(pore) = placement.pore_radius {
                check_pore(pore, placement.radius)?;
            }
        }

        // A half-space box is centered on a bisector point inside the model
        // and must reach every other model point from there.
        let needed = self.bounds().diagonal();
        if params.half_space_extent <= needed {
            return Err(ConfigurationError::HalfSpaceTooSmall {
                extent: params.half_space_extent,
                model_extent: needed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_up_matches_reference_layout() {
        let params = SacParams::default();
        let layout = SacLayout::bottom_up(&params);
        let centers = layout.centers();
        assert_eq!(centers.len(), 4);

        let z0 = 2.0 + (1.5f64 * 1.5 - 0.25).sqrt();
        assert!((centers[0].z - z0).abs() < 1e-12);
        assert!((centers[1].z - (z0 + 2.4)).abs() < 1e-12);
        assert!((centers[2].x - 1.65).abs() < 1e-12);
        assert!((centers[3].x + 1.65).abs() < 1e-12);
        assert!((centers[2].z - (z0 + 1.2)).abs() < 1e-12);
    }

    #[test]
    fn central_acinus_meets_tube_rim() {
        let params = SacParams::default();
        let layout = SacLayout::bottom_up(&params);
        let rim = Point3::new(params.tube_radius, 0.0, params.tube_length);
        let d = (rim - layout.placements[0].center).norm();
        assert!((d - params.acinus_radius).abs() < 1e-12);
    }

    #[test]
    fn single_placement_is_rejected() {
        let params = SacParams::default();
        let mut layout = SacLayout::bottom_up(&params);
        layout.placements.truncate(1);
        assert!(matches!(
            layout.validate(&params),
            Err(ConfigurationError::TooFewPlacements(1))
        ));
    }

    #[test]
    fn small_half_space_is_rejected() {
        let params = SacParams::default().with_half_space_extent(5.0);
        let layout = SacLayout::bottom_up(&params);
        assert!(matches!(
            layout.validate(&params),
            Err(ConfigurationError::HalfSpaceTooSmall { .. })
        ));
        assert!(layout.validate(&SacParams::default()).is_ok());
    }

    #[test]
    fn placement_pore_override() {
        let params = SacParams::default();
        let placement = AcinusPlacement::new(Point3::origin(), 1.5).with_pore_radius(0.1);
        assert!((placement.effective_pore_radius(&params) - 0.1).abs() < 1e-12);
        let inherited = AcinusPlacement::new(Point3::origin(), 1.5);
        assert!((inherited.effective_pore_radius(&params) - 0.3).abs() < 1e-12);

        let mut layout = SacLayout::bottom_up(&params);
        layout.placements[1] = layout.placements[1].with_pore_radius(2.0);
        assert!(layout.validate(&params).is_err());
    }
}
