//! Stitched reconstruction of per-patch results
//!
//! The inverse of tiling: results arrive lazily in offset-list order and
//! each one is written into its window of a freshly allocated output
//! buffer. Where windows overlap, the later result in iteration order
//! wins outright; overlap exists to pad the model's receptive field, not
//! to blend outputs.

use log::debug;
use ndarray::{s, Array3};

use crate::tiling::dimensions::Dimensions;
use crate::tiling::errors::{PatchError, PatchResult};
use crate::tiling::offsets::Offset;

/// Rebuild a full-size array from per-patch results
///
/// Consumes one result per offset, validating each as it arrives: the
/// spatial extent must equal the offset's window and the channel count
/// must equal `dims.depth` (adapt channels before calling, see
/// `broadcast_channels`). Validation is per item, so earlier results may
/// already be written when a later one fails; the buffer is only handed
/// out on full success.
///
/// # Arguments
/// * `dims` - Dimensions of the original input
/// * `offsets` - Window placements the patches were extracted with
/// * `results` - Per-patch results, exactly one per offset, in order
///
/// # Returns
/// The reconstructed array, or the first mismatch or propagated error
pub fn reconstruct<I>(
    dims: Dimensions,
    offsets: &[Offset],
    results: I,
) -> PatchResult<Array3<u8>>
where
    I: IntoIterator<Item = PatchResult<Array3<u8>>>,
{
    let mut buffer = Array3::zeros((dims.height, dims.width, dims.depth));
    let mut results = results.into_iter();

    for (index, offset) in offsets.iter().enumerate() {
        let result = match results.next() {
            Some(result) => result?,
            None => {
                return Err(PatchError::PatchCountMismatch {
                    expected: offsets.len(),
                    actual: index,
                })
            }
        };

        let (height, width, depth) = result.dim();
        if height != offset.height() || width != offset.width() {
            return Err(PatchError::ShapeMismatch {
                expected: (offset.height(), offset.width()),
                actual: (height, width),
            });
        }
        if depth != dims.depth {
            return Err(PatchError::ChannelMismatch {
                expected: dims.depth,
                actual: depth,
            });
        }

        buffer
            .slice_mut(s![
                offset.y_start..offset.y_end,
                offset.x_start..offset.x_end,
                ..
            ])
            .assign(&result);
        debug!(
            "Stitched patch {} into [{}..{}, {}..{}]",
            index, offset.y_start, offset.y_end, offset.x_start, offset.x_end
        );
    }

    if results.next().is_some() {
        return Err(PatchError::PatchCountMismatch {
            expected: offsets.len(),
            actual: offsets.len() + 1,
        });
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiling::{compute_offsets, TilingPolicy};

    fn gradient(height: usize, width: usize, depth: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, depth), |(y, x, c)| {
            ((y * 13 + x * 29 + c * 3) % 241) as u8
        })
    }

    #[test]
    fn test_round_trip_identity_without_overlap() {
        let dims = Dimensions::new(50, 70, 3).unwrap();
        let data = gradient(50, 70, 3);
        let offsets = compute_offsets(dims, 20, TilingPolicy::Stride(20)).unwrap();

        // Identity results: the patches themselves
        let results = offsets.iter().map(|offset| {
            Ok(data
                .slice(s![
                    offset.y_start..offset.y_end,
                    offset.x_start..offset.x_end,
                    ..
                ])
                .to_owned())
        });

        let rebuilt = reconstruct(dims, &offsets, results).unwrap();
        assert_eq!(rebuilt, data);
    }

    #[test]
    fn test_later_patch_wins_in_overlap() {
        let dims = Dimensions::new(4, 6, 1).unwrap();
        let offsets = vec![
            Offset { y_start: 0, y_end: 4, x_start: 0, x_end: 4 },
            Offset { y_start: 0, y_end: 4, x_start: 2, x_end: 6 },
        ];

        let results = vec![
            Ok(Array3::from_elem((4, 4, 1), 10u8)),
            Ok(Array3::from_elem((4, 4, 1), 200u8)),
        ];

        let rebuilt = reconstruct(dims, &offsets, results).unwrap();
        // The overlapped band [0..4, 2..4] holds the second patch's value
        assert_eq!(rebuilt[[0, 1, 0]], 10);
        assert_eq!(rebuilt[[0, 2, 0]], 200);
        assert_eq!(rebuilt[[3, 3, 0]], 200);
    }

    #[test]
    fn test_too_few_results() {
        let dims = Dimensions::new(8, 8, 1).unwrap();
        let offsets = compute_offsets(dims, 4, TilingPolicy::Stride(4)).unwrap();

        let results = vec![Ok(Array3::from_elem((4, 4, 1), 1u8))];
        let err = reconstruct(dims, &offsets, results).unwrap_err();
        assert!(matches!(err, PatchError::PatchCountMismatch { actual: 1, .. }));
    }

    #[test]
    fn test_too_many_results() {
        let dims = Dimensions::new(4, 4, 1).unwrap();
        let offsets = compute_offsets(dims, 4, TilingPolicy::Stride(4)).unwrap();

        let results = vec![
            Ok(Array3::from_elem((4, 4, 1), 1u8)),
            Ok(Array3::from_elem((4, 4, 1), 2u8)),
        ];
        let err = reconstruct(dims, &offsets, results).unwrap_err();
        assert!(matches!(err, PatchError::PatchCountMismatch { .. }));
    }

    #[test]
    fn test_wrong_spatial_extent() {
        let dims = Dimensions::new(4, 4, 1).unwrap();
        let offsets = compute_offsets(dims, 4, TilingPolicy::Stride(4)).unwrap();

        let results = vec![Ok(Array3::from_elem((3, 4, 1), 1u8))];
        let err = reconstruct(dims, &offsets, results).unwrap_err();
        assert!(matches!(err, PatchError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_wrong_channel_count() {
        let dims = Dimensions::new(4, 4, 3).unwrap();
        let offsets = compute_offsets(dims, 4, TilingPolicy::Stride(4)).unwrap();

        let results = vec![Ok(Array3::from_elem((4, 4, 1), 1u8))];
        let err = reconstruct(dims, &offsets, results).unwrap_err();
        assert!(matches!(err, PatchError::ChannelMismatch { expected: 3, actual: 1 }));
    }

    #[test]
    fn test_propagates_result_errors() {
        let dims = Dimensions::new(4, 4, 1).unwrap();
        let offsets = compute_offsets(dims, 4, TilingPolicy::Stride(4)).unwrap();

        let results = vec![Err(PatchError::GenericError("inference failed".to_string()))];
        assert!(reconstruct(dims, &offsets, results).is_err());
    }
}
