mod bounding_box;
mod components;
mod is_empty;
mod surface_area;
mod volume;

pub use bounding_box::BoundingBox;
pub use components::Components;
pub use is_empty::IsEmpty;
pub use surface_area::SurfaceArea;
pub use volume::Volume;

pub(crate) use is_empty::node_is_empty;

use crate::csg::CsgNode;
use crate::error::{OperationError, Result};
use crate::math::grid::SampleGrid;

/// Parameters controlling grid-sampled queries.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    /// Edge length of a sampling cell.
    pub cell_size: f64,
    /// Upper bound on the number of cells a single query may visit.
    pub max_cells: usize,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            cell_size: 0.05,
            max_cells: 16_000_000,
        }
    }
}

/// Builds the sampling grid for a tree, or `None` if its bounds are empty.
fn grid_for(node: &CsgNode, params: SamplingParams, padding: usize) -> Result<Option<SampleGrid>> {
    let aabb = node.aabb();
    if aabb.is_empty() {
        return Ok(None);
    }
    SampleGrid::covering(&aabb.min, &aabb.max, params.cell_size, padding, params.max_cells)
        .map(Some)
        .map_err(|e| OperationError::InvalidInput(format!("query grid: {e}")).into())
}
