//! Conversions between decoded images and (height, width, depth) arrays
//!
//! The tiling core works on plain `ndarray` arrays; this module is the
//! only place where those arrays meet the image codec layer. Arrays use
//! row-major (height, width, depth) layout, matching the raw buffer
//! order of the image crate.

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use log::debug;
use ndarray::{Array3, ArrayView3};

use crate::tiling::errors::{PatchError, PatchResult};

/// Load an image file into an RGB array
///
/// The file is decoded with the image crate and normalized to three
/// channels regardless of its on-disk pixel format.
///
/// # Arguments
/// * `path` - Path to the image file
///
/// # Returns
/// The decoded array in (height, width, 3) layout, or an error
pub fn load_image_array(path: &str) -> PatchResult<Array3<u8>> {
    let img = image::open(path)?;
    let data = image_to_array(&img);
    let (height, width, _) = data.dim();
    debug!("Loaded {} ({}x{})", path, width, height);
    Ok(data)
}

/// Convert a decoded image to an RGB array
pub fn image_to_array(img: &DynamicImage) -> Array3<u8> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    // The raw buffer is row-major with interleaved channels, exactly the
    // (height, width, 3) layout, so the shape can never disagree
    Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())
        .unwrap_or_else(|_| Array3::zeros((height as usize, width as usize, 3)))
}

/// Convert a decoded image to an array, keeping a single-channel format
///
/// Grayscale images come back as (height, width, 1); everything else is
/// normalized to RGB. Used on the patch read-back path where a model may
/// have produced single-channel output.
pub fn decode_patch(img: DynamicImage) -> Array3<u8> {
    match img {
        DynamicImage::ImageLuma8(gray) => {
            let (width, height) = gray.dimensions();
            Array3::from_shape_vec((height as usize, width as usize, 1), gray.into_raw())
                .unwrap_or_else(|_| Array3::zeros((height as usize, width as usize, 1)))
        }
        other => image_to_array(&other),
    }
}

/// Convert an array back into an encodable image
///
/// # Arguments
/// * `data` - Array in (height, width, depth) layout with 1, 3 or 4 channels
///
/// # Returns
/// A DynamicImage wrapping the array's pixels, or an error for a channel
/// count no image format expresses
pub fn array_to_image(data: ArrayView3<u8>) -> PatchResult<DynamicImage> {
    let (height, width, depth) = data.dim();
    // iter() walks the logical order, so this is safe for sliced views
    // whose memory is not contiguous
    let buffer: Vec<u8> = data.iter().copied().collect();

    let image = match depth {
        1 => GrayImage::from_raw(width as u32, height as u32, buffer)
            .map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width as u32, height as u32, buffer)
            .map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width as u32, height as u32, buffer)
            .map(DynamicImage::ImageRgba8),
        other => {
            return Err(PatchError::GenericError(format!(
                "No image representation for {} channels",
                other
            )))
        }
    };

    image.ok_or_else(|| {
        PatchError::GenericError(format!(
            "Buffer too small for a {}x{}x{} image",
            height, width, depth
        ))
    })
}

/// Encode an array and write it to a file
///
/// # Arguments
/// * `path` - Destination path, the extension selects the format
/// * `data` - Array in (height, width, depth) layout
pub fn save_array(path: &Path, data: ArrayView3<u8>) -> PatchResult<()> {
    let image = array_to_image(data)?;
    image.save(path)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
