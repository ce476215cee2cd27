/*!
 * Tests for background clip geometry and selection
 */

use shortvid::background::{crop_scale_filter, loops_needed, select_background_clip, CropApplied};

use crate::common;

/// Test center cropping a landscape source to the portrait target
#[test]
fn test_crop_scale_filter_withLandscapeSource_shouldCropWidthSymmetrically() {
    let (filter, applied) = crop_scale_filter(1920, 1080, 1080, 1920, "center");

    // 9:16 slice of a 1080-high frame is 607px wide, centered at x=656
    assert_eq!(filter, "crop=607:1080:656:0,scale=1080:1920");
    assert_eq!(applied, CropApplied::Center);
}

/// Test center cropping a source taller than the target aspect
#[test]
fn test_crop_scale_filter_withTallSource_shouldCropHeightSymmetrically() {
    let (filter, applied) = crop_scale_filter(1080, 2400, 1080, 1920, "center");

    // 1080-wide frame at 9:16 is 1920px tall, centered at y=240
    assert_eq!(filter, "crop=1080:1920:0:240,scale=1080:1920");
    assert_eq!(applied, CropApplied::Center);
}

/// Test fit mode letterboxing
#[test]
fn test_crop_scale_filter_withFitMode_shouldScaleAndPad() {
    let (filter, applied) = crop_scale_filter(1920, 1080, 1080, 1920, "fit");

    // Uniform scale factor 0.5625 gives 1080x607, snapped to even 606
    assert_eq!(filter, "scale=1080:606,pad=1080:1920:0:657:black");
    assert_eq!(applied, CropApplied::Fit);
}

/// Test unrecognized modes degrading to center with the fallback recorded
#[test]
fn test_crop_scale_filter_withUnknownMode_shouldFallBackToCenter() {
    let (filter, applied) = crop_scale_filter(1920, 1080, 1080, 1920, "smart");
    let (center_filter, _) = crop_scale_filter(1920, 1080, 1080, 1920, "center");

    assert_eq!(filter, center_filter);
    assert_eq!(applied, CropApplied::FallbackCenter { requested: "smart".to_string() });
}

/// Test a source already at the target aspect
#[test]
fn test_crop_scale_filter_withMatchingAspect_shouldOnlyScale() {
    let (filter, applied) = crop_scale_filter(540, 960, 1080, 1920, "center");

    assert_eq!(filter, "crop=540:960:0:0,scale=1080:1920");
    assert_eq!(applied, CropApplied::Center);
}

/// Test loop counting
#[test]
fn test_loops_needed_withVariousDurations_shouldCoverTarget() {
    assert_eq!(loops_needed(10.0, 45.0), 5);
    assert_eq!(loops_needed(10.0, 10.0), 1);
    assert_eq!(loops_needed(60.0, 30.0), 1);
    assert_eq!(loops_needed(30.0, 30.1), 2);
    assert_eq!(loops_needed(0.0, 30.0), 1);
}

/// Test clip selection over an empty folder
#[test]
fn test_select_background_clip_withEmptyFolder_shouldReturnNone() {
    let temp_dir = common::create_temp_dir().unwrap();
    let selection = select_background_clip(temp_dir.path()).unwrap();
    assert!(selection.is_none());
}

/// Test clip selection over a missing folder
#[test]
fn test_select_background_clip_withMissingFolder_shouldReturnNone() {
    let temp_dir = common::create_temp_dir().unwrap();
    let missing = temp_dir.path().join("does_not_exist");
    let selection = select_background_clip(&missing).unwrap();
    assert!(selection.is_none());
}

/// Test that only supported video extensions are candidates
#[test]
fn test_select_background_clip_withMixedFiles_shouldPickOnlyVideos() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "notes.txt", "not a clip").unwrap();
    common::create_test_file(&dir, "clip.mp4", "fake video bytes").unwrap();

    for _ in 0..10 {
        let selection = select_background_clip(&dir).unwrap();
        let path = selection.expect("the single video file should always be picked");
        assert_eq!(path.file_name().unwrap(), "clip.mp4");
    }
}
