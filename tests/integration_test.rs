//! Integration tests for the tiling pipeline

use ndarray::{s, Array3};

use patchkit::pipeline::run_pipeline;
use patchkit::utils::array_utils;
use patchkit::{
    broadcast_channels, compute_offsets, extract_patches, reconstruct, Dimensions,
    GrayscaleModel, IdentityModel, MemorySink, PatchSession, PatchSet, PngSink, Segmenter,
    TilingPolicy,
};

/// Deterministic RGB test pattern
fn test_image(height: usize, width: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        ((y * 37 + x * 11 + c * 101) % 256) as u8
    })
}

#[test]
fn test_in_memory_round_trip_identity() {
    let data = test_image(100, 140);
    let dims = Dimensions::of(&data.view()).unwrap();
    let offsets = compute_offsets(dims, 32, TilingPolicy::Stride(32)).unwrap();

    let mut sink = MemorySink::new();
    let count = extract_patches(data.view(), &offsets, &mut sink).unwrap();
    assert_eq!(count, offsets.len());

    let results = sink.into_patches().into_iter().map(Ok);
    let rebuilt = reconstruct(dims, &offsets, results).unwrap();
    assert_eq!(rebuilt, data);
}

#[test]
fn test_persisted_patches_survive_the_disk_round_trip() {
    let data = test_image(60, 90);
    let dims = Dimensions::of(&data.view()).unwrap();
    let offsets = compute_offsets(dims, 25, TilingPolicy::Overlap(0.2)).unwrap();

    let mut session = PatchSession::begin(None).unwrap();
    let mut sink = PngSink::new(session.path().unwrap());
    let count = extract_patches(data.view(), &offsets, &mut sink).unwrap();

    let patches = PatchSet::new(session.path().unwrap(), count);
    for (index, offset) in offsets.iter().enumerate() {
        let loaded = patches.load(index).unwrap();
        let expected = data
            .slice(s![
                offset.y_start..offset.y_end,
                offset.x_start..offset.x_end,
                ..
            ])
            .to_owned();
        assert_eq!(loaded, expected, "patch {} changed on disk", index);
    }

    session.release().unwrap();
}

#[test]
fn test_full_pipeline_identity_reproduces_the_input() {
    let data = test_image(80, 120);
    let work_dir = tempfile::tempdir().unwrap();
    let input_path = work_dir.path().join("input.png");
    let output_path = work_dir.path().join("output.png");

    array_utils::save_array(&input_path, data.view()).unwrap();

    // Non-overlapping tiling with an identity model must reproduce the
    // input pixel for pixel
    run_pipeline(
        input_path.to_str().unwrap(),
        &output_path,
        32,
        TilingPolicy::Stride(32),
        &IdentityModel,
        Some(work_dir.path()),
    )
    .unwrap();

    let rebuilt = array_utils::load_image_array(output_path.to_str().unwrap()).unwrap();
    assert_eq!(rebuilt, data);
}

#[test]
fn test_full_pipeline_grayscale_matches_direct_inference() {
    let data = test_image(70, 50);
    let work_dir = tempfile::tempdir().unwrap();
    let input_path = work_dir.path().join("input.png");
    let output_path = work_dir.path().join("mask.png");

    array_utils::save_array(&input_path, data.view()).unwrap();

    run_pipeline(
        input_path.to_str().unwrap(),
        &output_path,
        24,
        TilingPolicy::Overlap(0.0),
        &GrayscaleModel,
        Some(work_dir.path()),
    )
    .unwrap();

    // The stitched mask must equal grayscale applied to the whole image,
    // widened back to three channels
    let dims = Dimensions::of(&data.view()).unwrap();
    let expected = broadcast_channels(
        GrayscaleModel.infer(data.view()).unwrap(),
        dims.depth,
    )
    .unwrap();

    let rebuilt = array_utils::load_image_array(output_path.to_str().unwrap()).unwrap();
    assert_eq!(rebuilt, expected);
}

#[test]
fn test_pipeline_cleans_up_session_storage() {
    let data = test_image(40, 40);
    let work_dir = tempfile::tempdir().unwrap();
    let input_path = work_dir.path().join("input.png");
    let output_path = work_dir.path().join("output.png");
    let temp_parent = work_dir.path().join("sessions");
    std::fs::create_dir_all(&temp_parent).unwrap();

    array_utils::save_array(&input_path, data.view()).unwrap();

    run_pipeline(
        input_path.to_str().unwrap(),
        &output_path,
        16,
        TilingPolicy::Stride(16),
        &IdentityModel,
        Some(&temp_parent),
    )
    .unwrap();

    // Session storage is released on success, nothing lingers
    let leftovers: Vec<_> = std::fs::read_dir(&temp_parent).unwrap().collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_overlapping_tiling_still_covers_everything() {
    let data = test_image(101, 67);
    let dims = Dimensions::of(&data.view()).unwrap();
    let offsets = compute_offsets(dims, 30, TilingPolicy::Overlap(0.4)).unwrap();

    let mut sink = MemorySink::new();
    extract_patches(data.view(), &offsets, &mut sink).unwrap();

    // Identity results under overlap: later windows rewrite the shared
    // bands with the same pixels, so the output is still the input
    let results = sink.into_patches().into_iter().map(Ok);
    let rebuilt = reconstruct(dims, &offsets, results).unwrap();
    assert_eq!(rebuilt, data);
}
