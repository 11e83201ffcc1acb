pub mod node;
pub mod solid;

pub use node::CsgNode;
pub use solid::{SolidData, SolidId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all live solids.
///
/// Solids are addressed by typed IDs (generational indices). Destructive
/// operations remove their inputs with [`SolidStore::take_solid`], so a
/// consumed ID no longer resolves.
#[derive(Debug, Default)]
pub struct SolidStore {
    solids: SlotMap<SolidId, SolidData>,
}

impl SolidStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, TopologyError> {
        self.solids
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    /// Returns a mutable reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn solid_mut(&mut self, id: SolidId) -> Result<&mut SolidData, TopologyError> {
        self.solids
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    /// Removes a solid from the store and returns its data.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn take_solid(&mut self, id: SolidId) -> Result<SolidData, TopologyError> {
        self.solids
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    /// Number of live solids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    /// Returns `true` if no solid is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Primitive, Sphere};
    use crate::math::Point3;

    #[test]
    fn taken_solid_no_longer_resolves() {
        let mut store = SolidStore::new();
        let sphere = Sphere::new(Point3::origin(), 1.0).unwrap();
        let id = store.add_solid(SolidData::new(CsgNode::Primitive(Primitive::Sphere(sphere))));
        assert_eq!(store.len(), 1);

        store.take_solid(id).unwrap();
        assert!(store.is_empty());
        assert!(store.solid(id).is_err());
        assert!(store.take_solid(id).is_err());
    }
}
