//! Patch persistence
//!
//! This module owns the scoped temporary-storage lifetime of a tiling
//! session and streams sliced patches to pluggable sinks.

mod session;
mod sink;
mod store;

pub use session::PatchSession;
pub use sink::{patch_file_name, MemorySink, PatchSet, PatchSink, PngSink};
pub use store::extract_patches;
