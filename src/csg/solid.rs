use super::CsgNode;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the solid store.
    pub struct SolidId;
}

/// Data associated with a solid: the CSG tree describing its point set.
#[derive(Debug, Clone)]
pub struct SolidData {
    /// Root of the solid's CSG tree.
    pub node: CsgNode,
}

impl SolidData {
    /// Wraps a tree as solid data.
    #[must_use]
    pub fn new(node: CsgNode) -> Self {
        Self { node }
    }
}
