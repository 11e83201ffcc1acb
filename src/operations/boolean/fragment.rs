use crate::csg::{CsgNode, SolidData, SolidId, SolidStore};
use crate::error::{OperationError, Result};
use crate::operations::query::{node_is_empty, SamplingParams};

use super::take_nodes;

/// Splits two solid lists against each other without discarding material.
///
/// With `A = ∪ objects` and `B = ∪ tools`, the result holds the non-empty
/// pieces among `A \ B`, `A ∩ B` and `B \ A`, in that order. Their union is
/// `A ∪ B`. All inputs are consumed.
pub struct Fragment {
    objects: Vec<SolidId>,
    tools: Vec<SolidId>,
    params: SamplingParams,
}

impl Fragment {
    /// Creates a new `Fragment` operation with default sampling.
    #[must_use]
    pub fn new(objects: Vec<SolidId>, tools: Vec<SolidId>) -> Self {
        Self {
            objects,
            tools,
            params: SamplingParams::default(),
        }
    }

    /// Sets the sampling used to drop empty pieces.
    #[must_use]
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the split, creating the pieces in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if either list is empty, names a missing solid, or a
    /// piece cannot be sampled.
    pub fn execute(&self, store: &mut SolidStore) -> Result<Vec<SolidId>> {
        if self.tools.iter().any(|id| self.objects.contains(id)) {
            return Err(OperationError::InvalidInput(
                "a solid cannot be both object and tool".into(),
            )
            .into());
        }
        for &id in &self.tools {
            store.solid(id)?;
        }
        let a = CsgNode::union_of(take_nodes(store, &self.objects, "object")?);
        let b = CsgNode::union_of(take_nodes(store, &self.tools, "tool")?);

        let candidates = [
            CsgNode::Difference(Box::new(a.clone()), Box::new(b.clone())),
            CsgNode::Intersection(vec![a.clone(), b.clone()]),
            CsgNode::Difference(Box::new(b), Box::new(a)),
        ];

        let mut pieces = Vec::with_capacity(candidates.len());
        for node in candidates {
            if !node_is_empty(&node, self.params)? {
                pieces.push(node);
            }
        }
        Ok(pieces
            .into_iter()
            .map(|node| store.add_solid(SolidData::new(node)))
            .collect())
    }
}
