//! Tiling core
//!
//! This module provides the structures and the offset-computation
//! algorithm that turn an input's dimensions and a tiling policy into an
//! ordered list of window placements.

pub mod errors;
pub mod dimensions;
pub mod policy;
pub mod offsets;
mod tests;

pub use errors::{PatchError, PatchResult};
pub use dimensions::Dimensions;
pub use policy::TilingPolicy;
pub use offsets::{compute_offsets, Offset};
