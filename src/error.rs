use thiserror::Error;

use crate::math::Point3;

/// Top-level error type for the acinar sac builder.
#[derive(Debug, Error)]
pub enum AcinarError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    /// The z-axis could not be aligned to a direction because the direction
    /// is not a finite unit vector.
    #[error("cannot align z-axis to direction {direction:?}")]
    Alignment { direction: [f64; 3] },
}

/// Errors related to the solid store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Parameter sets rejected before any kernel call.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("parameter {parameter} = {value} must be positive and finite")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("wall thickness {wall_thickness} must be below twice the acinus radius {radius}")]
    WallTooThick { wall_thickness: f64, radius: f64 },

    #[error("pore radius {pore_radius} must be below the acinus radius {radius}")]
    PoreTooWide { pore_radius: f64, radius: f64 },

    #[error("half-space extent {extent} does not cover the model extent {model_extent}")]
    HalfSpaceTooSmall { extent: f64, model_extent: f64 },

    #[error("at least 2 placements are required, got {0}")]
    TooFewPlacements(usize),
}

/// Failures while carving and composing the sac.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// A boolean step produced nothing where the neighbor relation predicted
    /// overlap. The offending pair is reported as given to the carver.
    #[error(
        "{stage} failed between acinus at ({}, {}, {}) and neighbor at ({}, {}, {}): {reason}",
        .candidate.x, .candidate.y, .candidate.z, .neighbor.x, .neighbor.y, .neighbor.z
    )]
    KernelFailure {
        stage: &'static str,
        candidate: Point3,
        neighbor: Point3,
        reason: String,
    },

    #[error("union of an empty region list")]
    UnionOfNothing,

    #[error("composer is in state {state}, expected {expected}")]
    InvalidState {
        state: &'static str,
        expected: &'static str,
    },
}

/// Convenience type alias for results using [`AcinarError`].
pub type Result<T> = std::result::Result<T, AcinarError>;
