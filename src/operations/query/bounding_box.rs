use crate::csg::{SolidId, SolidStore};
use crate::error::Result;
use crate::geometry::Aabb;

/// Computes the conservative axis-aligned bounding box of a solid.
///
/// Intersections are bounded by the overlap of their operands' boxes, so
/// the result can be larger than the solid but never smaller.
pub struct BoundingBox {
    solid: SolidId,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &SolidStore) -> Result<Aabb> {
        Ok(store.solid(self.solid)?.node.aabb())
    }
}
