use crate::csg::{SolidId, SolidStore};
use crate::error::Result;

use super::{grid_for, SamplingParams};

/// Computes the volume of a solid.
///
/// Counts sampling cells whose center lies inside the solid and multiplies
/// by the cell volume. The estimate is deterministic for a given cell size.
pub struct Volume {
    solid: SolidId,
    params: SamplingParams,
}

impl Volume {
    /// Creates a new `Volume` query with default sampling.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
            params: SamplingParams::default(),
        }
    }

    /// Sets custom sampling parameters for higher accuracy.
    #[must_use]
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing or the grid exceeds its budget.
    pub fn execute(&self, store: &SolidStore) -> Result<f64> {
        let node = &store.solid(self.solid)?.node;
        let Some(grid) = grid_for(node, self.params, 1)? else {
            return Ok(0.0);
        };

        let inside = grid
            .cells()
            .filter(|&(i, j, k)| node.contains(&grid.cell_center(i, j, k)))
            .count();

        #[allow(clippy::cast_precision_loss)]
        let inside = inside as f64;
        Ok(inside * grid.cell_size().powi(3))
    }
}
