use crate::error::ConfigurationError;

/// Geometry parameters of the sac model.
///
/// Threaded explicitly through every component; there is no global default
/// state. Lengths share one arbitrary unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SacParams {
    /// Radius of the airway tube.
    pub tube_radius: f64,
    /// Length of the airway tube.
    pub tube_length: f64,
    /// Radius shared by all acini; also sets the neighbor threshold `2 * r`.
    pub acinus_radius: f64,
    /// Axial spacing of the default layout, in acinus radii.
    pub overlap_factor: f64,
    /// Lateral spacing of the default layout, in acinus radii.
    pub overlap_factor_lateral: f64,
    /// Radius of the pores connecting adjacent acini.
    pub pore_radius: f64,
    /// Gap between two adjacent carved acini.
    pub wall_thickness: f64,
    /// Half edge length of the boxes standing in for half-spaces.
    pub half_space_extent: f64,
}

impl Default for SacParams {
    fn default() -> Self {
        Self {
            tube_radius: 0.5,
            tube_length: 2.0,
            acinus_radius: 1.5,
            overlap_factor: 0.8,
            overlap_factor_lateral: 1.1,
            pore_radius: 0.3,
            wall_thickness: 0.05,
            half_space_extent: 1500.0,
        }
    }
}

impl SacParams {
    /// Sets the tube radius.
    #[must_use]
    pub fn with_tube_radius(mut self, tube_radius: f64) -> Self {
        self.tube_radius = tube_radius;
        self
    }

    /// Sets the tube length.
    #[must_use]
    pub fn with_tube_length(mut self, tube_length: f64) -> Self {
        self.tube_length = tube_length;
        self
    }

    /// Sets the acinus radius.
    #[must_use]
    pub fn with_acinus_radius(mut self, acinus_radius: f64) -> Self {
        self.acinus_radius = acinus_radius;
        self
    }

    /// Sets the axial and lateral spacing factors of the default layout.
    #[must_use]
    pub fn with_overlap_factors(mut self, axial: f64, lateral: f64) -> Self {
        self.overlap_factor = axial;
        self.overlap_factor_lateral = lateral;
        self
    }

    /// Sets the pore radius.
    #[must_use]
    pub fn with_pore_radius(mut self, pore_radius: f64) -> Self {
        self.pore_radius = pore_radius;
        self
    }

    /// Sets the wall thickness.
    #[must_use]
    pub fn with_wall_thickness(mut self, wall_thickness: f64) -> Self {
        self.wall_thickness = wall_thickness;
        self
    }

    /// Sets the half-space box extent.
    #[must_use]
    pub fn with_half_space_extent(mut self, half_space_extent: f64) -> Self {
        self.half_space_extent = half_space_extent;
        self
    }

    /// Checks the parameter set on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if a length is not positive, the wall is at least
    /// twice the acinus radius, or the pore is at least as wide as an acinus.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (parameter, value) in [
            ("tube_radius", self.tube_radius),
            ("tube_length", self.tube_length),
            ("acinus_radius", self.acinus_radius),
            ("overlap_factor", self.overlap_factor),
            ("overlap_factor_lateral", self.overlap_factor_lateral),
            ("pore_radius", self.pore_radius),
            ("wall_thickness", self.wall_thickness),
            ("half_space_extent", self.half_space_extent),
        ] {
            ensure_positive(parameter, value)?;
        }

        if self.wall_thickness >= 2.0 * self.acinus_radius {
            return Err(ConfigurationError::WallTooThick {
                wall_thickness: self.wall_thickness,
                radius: self.acinus_radius,
            });
        }
        check_pore(self.pore_radius, self.acinus_radius)
    }
}

pub(crate) fn ensure_positive(
    parameter: &'static str,
    value: f64,
) -> Result<(), ConfigurationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { parameter, value })
    }
}

pub(crate) fn check_pore(pore_radius: f64, radius: f64) -> Result<(), ConfigurationError> {
    ensure_positive("pore_radius", pore_radius)?;
    if pore_radius >= radius {
        return Err(ConfigurationError::PoreTooWide { pore_radius, radius });
    }
    Ok(())
}
