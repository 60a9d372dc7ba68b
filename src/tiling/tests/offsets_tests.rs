//! Tests for window placement computation

use crate::tiling::{compute_offsets, Dimensions, Offset, PatchError, TilingPolicy};

fn dims(height: usize, width: usize) -> Dimensions {
    Dimensions::new(height, width, 3).unwrap()
}

/// Collect the distinct start positions along each axis, in first-seen order
fn axis_positions(offsets: &[Offset]) -> (Vec<usize>, Vec<usize>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for offset in offsets {
        if !xs.contains(&offset.x_start) {
            xs.push(offset.x_start);
        }
        if !ys.contains(&offset.y_start) {
            ys.push(offset.y_start);
        }
    }
    (xs, ys)
}

#[test]
fn test_500x500_patch_224_no_overlap() {
    let offsets = compute_offsets(dims(500, 500), 224, TilingPolicy::Overlap(0.0)).unwrap();

    let (xs, ys) = axis_positions(&offsets);
    assert_eq!(xs, vec![0, 224, 276]);
    assert_eq!(ys, vec![0, 224, 276]);
    assert_eq!(offsets.len(), 9);

    // Every window spans exactly 224 pixels, including the trailing ones
    // since 500 - 276 = 224
    for offset in &offsets {
        assert_eq!(offset.height(), 224);
        assert_eq!(offset.width(), 224);
    }
    assert_eq!(offsets.last().unwrap().y_end, 500);
    assert_eq!(offsets.last().unwrap().x_end, 500);
}

#[test]
fn test_500x500_patch_300_trailing_correction() {
    let offsets = compute_offsets(dims(500, 500), 300, TilingPolicy::Overlap(0.0)).unwrap();

    // Step 300 overshoots the last valid start 200, which must be
    // appended explicitly
    let (xs, ys) = axis_positions(&offsets);
    assert_eq!(xs, vec![0, 200]);
    assert_eq!(ys, vec![0, 200]);
    assert_eq!(offsets.len(), 4);
}

#[test]
fn test_iteration_order_is_x_outer_y_inner() {
    let offsets = compute_offsets(dims(500, 500), 224, TilingPolicy::Overlap(0.0)).unwrap();

    let expected: Vec<(usize, usize)> = vec![
        (0, 0), (224, 0), (276, 0),
        (0, 224), (224, 224), (276, 224),
        (0, 276), (224, 276), (276, 276),
    ];
    let actual: Vec<(usize, usize)> = offsets
        .iter()
        .map(|o| (o.y_start, o.x_start))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_every_pixel_is_covered() {
    let cases = [
        (500, 500, 224, TilingPolicy::Overlap(0.0)),
        (500, 500, 300, TilingPolicy::Overlap(0.0)),
        (97, 53, 32, TilingPolicy::Overlap(0.25)),
        (64, 64, 16, TilingPolicy::Stride(10)),
        (10, 7, 4, TilingPolicy::Default),
    ];

    for (height, width, patch_size, policy) in cases {
        let offsets = compute_offsets(dims(height, width), patch_size, policy).unwrap();

        let mut covered = vec![false; height * width];
        for offset in &offsets {
            for y in offset.y_start..offset.y_end {
                for x in offset.x_start..offset.x_end {
                    covered[y * width + x] = true;
                }
            }
        }
        assert!(
            covered.iter().all(|&c| c),
            "uncovered pixels for {}x{} patch {}",
            height,
            width,
            patch_size
        );
    }
}

#[test]
fn test_windows_stay_in_bounds() {
    let offsets = compute_offsets(dims(97, 53), 32, TilingPolicy::Overlap(0.25)).unwrap();

    for offset in &offsets {
        assert!(offset.y_start < offset.y_end);
        assert!(offset.x_start < offset.x_end);
        assert!(offset.y_end <= 97);
        assert!(offset.x_end <= 53);
    }
}

#[test]
fn test_patch_larger_than_input_is_clamped() {
    let offsets = compute_offsets(dims(100, 60), 224, TilingPolicy::Overlap(0.0)).unwrap();

    // One window covering the whole input
    assert_eq!(offsets.len(), 1);
    assert_eq!(
        offsets[0],
        Offset { y_start: 0, y_end: 100, x_start: 0, x_end: 60 }
    );
}

#[test]
fn test_default_policy_slides_one_pixel_at_a_time() {
    let offsets = compute_offsets(dims(10, 12), 4, TilingPolicy::Default).unwrap();

    // last start per axis: 10-4=6 and 12-4=8, step 1 visits them all
    assert_eq!(offsets.len(), 7 * 9);
}

#[test]
fn test_stride_policy() {
    let offsets = compute_offsets(dims(100, 100), 40, TilingPolicy::Stride(30)).unwrap();

    let (xs, ys) = axis_positions(&offsets);
    assert_eq!(xs, vec![0, 30, 60]);
    assert_eq!(ys, vec![0, 30, 60]);
}

#[test]
fn test_determinism() {
    let first = compute_offsets(dims(97, 53), 32, TilingPolicy::Overlap(0.3)).unwrap();
    let second = compute_offsets(dims(97, 53), 32, TilingPolicy::Overlap(0.3)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_zero_patch_size_is_rejected() {
    let result = compute_offsets(dims(100, 100), 0, TilingPolicy::Default);
    assert!(matches!(result, Err(PatchError::InvalidPatchSize(0))));
}

#[test]
fn test_zero_dimension_is_rejected() {
    assert!(matches!(
        Dimensions::new(0, 100, 3),
        Err(PatchError::EmptyDimension("height"))
    ));
    assert!(matches!(
        Dimensions::new(100, 0, 3),
        Err(PatchError::EmptyDimension("width"))
    ));
    assert!(matches!(
        Dimensions::new(100, 100, 0),
        Err(PatchError::EmptyDimension("depth"))
    ));
}
