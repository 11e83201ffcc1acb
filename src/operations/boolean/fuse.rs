use crate::csg::{CsgNode, SolidData, SolidId, SolidStore};
use crate::error::{OperationError, Result};

use super::take_nodes;

/// Computes the boolean union of two solid lists.
///
/// The result is a single solid `(∪ objects) ∪ (∪ tools)`; disjoint inputs
/// stay disjoint inside it. All inputs are consumed.
pub struct Fuse {
    objects: Vec<SolidId>,
    tools: Vec<SolidId>,
}

impl Fuse {
    /// Creates a new `Fuse` operation.
    #[must_use]
    pub fn new(objects: Vec<SolidId>, tools: Vec<SolidId>) -> Self {
        Self { objects, tools }
    }

    /// Executes the union, creating the result solid in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if either list is empty or names a missing solid.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        if self.tools.iter().any(|id| self.objects.contains(id)) {
            return Err(OperationError::InvalidInput(
                "a solid cannot be both object and tool".into(),
            )
            .into());
        }
        for &id in &self.tools {
            store.solid(id)?;
        }
        let mut nodes = take_nodes(store, &self.objects, "object")?;
        nodes.extend(take_nodes(store, &self.tools, "tool")?);
        Ok(store.add_solid(SolidData::new(CsgNode::union_of(nodes))))
    }
}
