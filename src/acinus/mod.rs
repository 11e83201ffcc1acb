//! Acinar sac construction.
//!
//! Overlapping acinus spheres are cut back to their own side of a thin wall
//! on every shared bisector plane, pores are opened through each wall, and
//! the pieces are folded into one solid on top of an airway tube.

mod carve;
mod composer;
mod half_space;
mod neighbors;
mod params;
mod placement;
mod pore;
mod union_all;

pub use carve::{CarveAcinus, Carved};
pub use composer::{AssemblyReport, ComposerState, SacComposer, SacModel, Seam};
pub use half_space::{Bisector, BuildHalfSpaces, HalfSpacePair};
pub use neighbors::{is_neighbor, neighbor_indices, neighbors, overlapping_pairs};
pub use params::SacParams;
pub use placement::{AcinusPlacement, SacLayout, Tube};
pub use pore::AddPoreChannels;
pub use union_all::union_all;
