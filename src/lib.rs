//! Acinar sac geometry.
//!
//! [`acinus`] builds a lung sac from overlapping acinus spheres on an airway
//! tube. It drives any [`kernel::GeometryKernel`]; [`kernel::CsgKernel`] is
//! the bundled implementation over the [`csg`] store.

pub mod acinus;
pub mod csg;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{AcinarError, Result};
