use crate::csg::{SolidId, SolidStore};
use crate::error::Result;
use crate::tessellation::{MeshParams, TessellateSolid};

/// Computes the surface area of a solid from its tessellation.
///
/// Accuracy follows the element size of the mesh parameters.
pub struct SurfaceArea {
    solid: SolidId,
    params: MeshParams,
}

impl SurfaceArea {
    /// Creates a new `SurfaceArea` query with default mesh parameters.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
            params: MeshParams::default(),
        }
    }

    /// Sets custom mesh parameters.
    #[must_use]
    pub fn with_params(mut self, params: MeshParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the area.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid cannot be tessellated.
    pub fn execute(&self, store: &SolidStore) -> Result<f64> {
        let mesh = TessellateSolid::new(self.solid, self.params).execute(store)?;
        Ok(mesh.area())
    }
}
