pub mod tiling;
pub mod store;
pub mod stitch;
pub mod model;
pub mod pipeline;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::PatchKit;

pub use tiling::{compute_offsets, Dimensions, Offset, TilingPolicy};
pub use tiling::errors::{PatchError, PatchResult};
pub use store::{extract_patches, MemorySink, PatchSession, PatchSet, PatchSink, PngSink};
pub use stitch::{broadcast_channels, reconstruct};
pub use model::{GrayscaleModel, IdentityModel, Segmenter, SegmenterFactory};
