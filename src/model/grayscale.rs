//! Grayscale dummy segmentation model

use ndarray::{Array3, ArrayView3};

use crate::tiling::errors::{PatchError, PatchResult};
use super::segmenter::Segmenter;

/// Model collapsing an RGB patch to a single luma channel
///
/// A stand-in with the shape profile of a real segmentation model: three
/// channels in, one channel out, so the channel-adaptation path gets
/// exercised exactly as it would be in production.
pub struct GrayscaleModel;

impl Segmenter for GrayscaleModel {
    fn infer(&self, patch: ArrayView3<u8>) -> PatchResult<Array3<u8>> {
        let (height, width, depth) = patch.dim();
        if depth != 3 {
            return Err(PatchError::ChannelMismatch {
                expected: 3,
                actual: depth,
            });
        }

        let mut mask = Array3::zeros((height, width, 1));
        for y in 0..height {
            for x in 0..width {
                let r = patch[[y, x, 0]] as u32;
                let g = patch[[y, x, 1]] as u32;
                let b = patch[[y, x, 2]] as u32;
                // ITU-R BT.601 luma weights in fixed point
                mask[[y, x, 0]] = ((299 * r + 587 * g + 114 * b) / 1000) as u8;
            }
        }
        Ok(mask)
    }

    fn name(&self) -> &'static str {
        "Grayscale"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_single_channel() {
        let patch = Array3::from_elem((5, 4, 3), 100u8);
        let mask = GrayscaleModel.infer(patch.view()).unwrap();
        assert_eq!(mask.dim(), (5, 4, 1));
        // Uniform gray input maps to the same gray
        assert_eq!(mask[[2, 2, 0]], 100);
    }

    #[test]
    fn test_luma_weighting() {
        let mut patch = Array3::zeros((1, 1, 3));
        patch[[0, 0, 1]] = 255; // pure green
        let mask = GrayscaleModel.infer(patch.view()).unwrap();
        assert_eq!(mask[[0, 0, 0]], ((587 * 255) / 1000) as u8);
    }

    #[test]
    fn test_non_rgb_input_is_rejected() {
        let patch = Array3::from_elem((5, 4, 1), 9u8);
        assert!(matches!(
            GrayscaleModel.infer(patch.view()),
            Err(PatchError::ChannelMismatch { expected: 3, actual: 1 })
        ));
    }
}
