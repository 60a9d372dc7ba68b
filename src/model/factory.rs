//! Factory for creating segmenter stand-ins

use crate::tiling::errors::{PatchError, PatchResult};
use super::segmenter::Segmenter;
use super::identity::IdentityModel;
use super::grayscale::GrayscaleModel;

/// Factory for creating segmenters by name
pub struct SegmenterFactory;

impl SegmenterFactory {
    /// Get a segmenter by name
    pub fn get_by_name(name: &str) -> PatchResult<Box<dyn Segmenter>> {
        match name.to_lowercase().as_str() {
            "identity" => Ok(Box::new(IdentityModel)),
            "grayscale" | "gray" => Ok(Box::new(GrayscaleModel)),
            _ => Err(PatchError::GenericError(format!("Unknown model: {}", name))),
        }
    }
}
