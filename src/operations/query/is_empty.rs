use crate::csg::{CsgNode, SolidId, SolidStore};
use crate::error::Result;

use super::{grid_for, SamplingParams};

/// Checks whether a solid has any sampled interior.
///
/// A solid is empty if no cell center of the sampling grid lies inside it.
/// Slivers thinner than a cell may be reported as empty.
pub struct IsEmpty {
    solid: SolidId,
    params: SamplingParams,
}

impl IsEmpty {
    /// Creates a new `IsEmpty` query with default sampling.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
            params: SamplingParams::default(),
        }
    }

    /// Sets custom sampling parameters.
    #[must_use]
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing or the grid exceeds its budget.
    pub fn execute(&self, store: &SolidStore) -> Result<bool> {
        node_is_empty(&store.solid(self.solid)?.node, self.params)
    }
}

/// Grid-sampled emptiness test on a bare tree, stopping at the first hit.
pub(crate) fn node_is_empty(node: &CsgNode, params: SamplingParams) -> Result<bool> {
    let Some(grid) = grid_for(node, params, 0)? else {
        return Ok(true);
    };
    let any_inside = grid
        .cells()
        .any(|(i, j, k)| node.contains(&grid.cell_center(i, j, k)));
    Ok(!any_inside)
}
