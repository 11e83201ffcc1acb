mod classify;
mod fragment;
mod fuse;
mod intersect_op;

pub use classify::{classify_point_in_solid, PointClassification};
pub use fragment::Fragment;
pub use fuse::Fuse;
pub use intersect_op::Intersect;

use crate::csg::{CsgNode, SolidId, SolidStore};
use crate::error::{OperationError, Result};

/// Removes the listed solids from the store and returns their trees.
///
/// All ids are checked before any is removed, so a failed call consumes
/// nothing.
fn take_nodes(store: &mut SolidStore, ids: &[SolidId], role: &str) -> Result<Vec<CsgNode>> {
    if ids.is_empty() {
        return Err(OperationError::InvalidInput(format!("{role} list is empty")).into());
    }
    for &id in ids {
        store.solid(id)?;
    }
    for (n, &id) in ids.iter().enumerate() {
        if ids[..n].contains(&id) {
            return Err(
                OperationError::InvalidInput(format!("{role} list repeats a solid")).into(),
            );
        }
    }
    ids.iter()
        .map(|&id| Ok(store.take_solid(id)?.node))
        .collect()
}
