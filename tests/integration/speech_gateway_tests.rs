/*!
 * Integration tests for the speech gateway fallback chain
 */

use shortvid::app_config::VoiceProfile;
use shortvid::providers::mock::MockBackend;
use shortvid::speech::{SpeechGateway, TimingSource};
use shortvid::timing::TimestampRecord;

use crate::common;

fn plain_voice() -> VoiceProfile {
    VoiceProfile::new("alloy", 1.0, 1.0)
}

/// Test synthesis with no alignment credential: timings are estimated
#[tokio::test]
async fn test_synthesize_withNoAligner_shouldEstimateTimings() {
    let temp_dir = common::create_temp_dir().unwrap();
    let gateway = SpeechGateway::with_backend(Box::new(MockBackend::working()), None);

    let result = gateway
        .synthesize("This is a narrated test script.", &plain_voice(), temp_dir.path(), "take_one")
        .await
        .unwrap();

    assert_eq!(result.timing_source, TimingSource::Estimated);
    assert_eq!(result.record.words.len(), 6);

    // Estimation is normalized to the reported audio duration
    let last_end = result.record.words.last().unwrap().end;
    assert!((last_end - result.record.duration).abs() < 1e-9);
}

/// Test that gateway artifacts land on disk with the expected names
#[tokio::test]
async fn test_synthesize_withWorkingBackend_shouldWriteAudioAndTimestamps() {
    let temp_dir = common::create_temp_dir().unwrap();
    let gateway = SpeechGateway::with_backend(Box::new(MockBackend::working()), None);

    let result = gateway
        .synthesize("Persist me", &plain_voice(), temp_dir.path(), "take_two")
        .await
        .unwrap();

    assert_eq!(result.audio_path, temp_dir.path().join("take_two.mp3"));
    assert_eq!(result.timestamps_path, temp_dir.path().join("take_two_timestamps.json"));
    assert!(result.audio_path.exists());
    assert!(result.timestamps_path.exists());

    // The persisted record parses back to the in-memory one
    let content = std::fs::read_to_string(&result.timestamps_path).unwrap();
    let parsed: TimestampRecord = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.text, "Persist me");
    assert_eq!(parsed.words, result.record.words);
}

/// Test backends that carry their own timings bypass the fallback chain
#[tokio::test]
async fn test_synthesize_withNativeTimings_shouldUseBackendTimings() {
    let temp_dir = common::create_temp_dir().unwrap();
    let gateway = SpeechGateway::with_backend(Box::new(MockBackend::with_native_timings()), None);

    let result = gateway
        .synthesize("Native words arrive aligned", &plain_voice(), temp_dir.path(), "take_three")
        .await
        .unwrap();

    assert_eq!(result.timing_source, TimingSource::Native);
    assert_eq!(result.record.words.len(), 4);
}

/// Test synthesis failure is terminal
#[tokio::test]
async fn test_synthesize_withFailingBackend_shouldPropagateError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let gateway = SpeechGateway::with_backend(Box::new(MockBackend::failing()), None);

    let result = gateway
        .synthesize("Doomed request", &plain_voice(), temp_dir.path(), "take_four")
        .await;

    assert!(result.is_err());

    // No partial audio artifact for a failed synthesis
    assert!(!temp_dir.path().join("take_four.mp3").exists());
}
