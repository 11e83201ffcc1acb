use crate::error::{AssemblyError, Result};
use crate::kernel::GeometryKernel;

/// Unites a list of regions into one region list.
///
/// A single region is passed through untouched.
///
/// # Errors
///
/// Returns [`AssemblyError::UnionOfNothing`] for an empty list, or any
/// kernel error from the fuse.
pub fn union_all<K: GeometryKernel>(
    kernel: &mut K,
    mut regions: Vec<K::Region>,
) -> Result<Vec<K::Region>> {
    match regions.len() {
        0 => Err(AssemblyError::UnionOfNothing.into()),
        1 => Ok(regions),
        _ => {
            let rest = regions.split_off(1);
            kernel.fuse(regions, rest)
        }
    }
}
