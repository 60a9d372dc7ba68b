//! Spatial dimensions of the input being tiled
//!
//! This module defines the Dimensions structure describing the spatial
//! extent and channel count of the array a tiling session operates on.
//! The convention follows the usual image layout where the first axis
//! runs down the rows and the second across the columns.

use std::fmt;

use ndarray::ArrayView3;

use crate::tiling::errors::{PatchError, PatchResult};

/// Spatial extent and channel count of a tiling input
///
/// Holds the (height, width, depth) triple of the array being tiled.
/// Depth counts channels; it is validated and carried through a session
/// but never stepped along, tiling happens over the two spatial axes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of rows in the input
    pub height: usize,

    /// Number of columns in the input
    pub width: usize,

    /// Number of channels per pixel
    pub depth: usize,
}

impl Dimensions {
    /// Create a validated set of dimensions
    ///
    /// # Arguments
    /// * `height` - Number of rows, must be at least 1
    /// * `width` - Number of columns, must be at least 1
    /// * `depth` - Number of channels, must be at least 1
    ///
    /// # Returns
    /// A Dimensions value or an error naming the offending axis
    pub fn new(height: usize, width: usize, depth: usize) -> PatchResult<Self> {
        if height == 0 {
            return Err(PatchError::EmptyDimension("height"));
        }
        if width == 0 {
            return Err(PatchError::EmptyDimension("width"));
        }
        if depth == 0 {
            return Err(PatchError::EmptyDimension("depth"));
        }
        Ok(Dimensions { height, width, depth })
    }

    /// Read the dimensions off an existing array
    ///
    /// # Arguments
    /// * `data` - Array in (height, width, depth) layout
    ///
    /// # Returns
    /// The array's dimensions or an error if any axis is empty
    pub fn of(data: &ArrayView3<u8>) -> PatchResult<Self> {
        let (height, width, depth) = data.dim();
        Dimensions::new(height, width, depth)
    }

    /// Total number of elements an array of these dimensions holds
    pub fn element_count(&self) -> usize {
        self.height * self.width * self.depth
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.depth)
    }
}
