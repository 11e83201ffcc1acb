use crate::csg::{CsgNode, SolidData, SolidId, SolidStore};
use crate::error::{OperationError, Result};

use super::take_nodes;

/// Computes the boolean intersection of two solid lists.
///
/// The result is `(∪ objects) ∩ (∪ tools)`. All inputs are consumed.
pub struct Intersect {
    objects: Vec<SolidId>,
    tools: Vec<SolidId>,
}

impl Intersect {
    /// Creates a new `Intersect` operation.
    #[must_use]
    pub fn new(objects: Vec<SolidId>, tools: Vec<SolidId>) -> Self {
        Self { objects, tools }
    }

    /// Executes the intersection, creating the result solid in the store.
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
        // Validate tools before consuming objects.
        for &id in &self.tools {
            store.solid(id)?;
        }
        let a = take_nodes(store, &self.objects, "object")?;
        let b = take_nodes(store, &self.tools, "tool")?;
        let node = CsgNode::Intersection(vec![CsgNode::union_of(a), CsgNode::union_of(b)]);
        Ok(store.add_solid(SolidData::new(node)))
    }
}
