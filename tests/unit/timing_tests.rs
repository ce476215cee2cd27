/*!
 * Tests for word timing estimation
 */

use shortvid::timing::{estimate_timestamps, estimate_timestamps_linear, TimestampRecord, WordTiming};

/// Test that estimation covers every word of the text
#[test]
fn test_estimate_timestamps_withSimpleText_shouldProduceOneTimingPerWord() {
    let text = "The quick brown fox jumps over the lazy dog";
    let timings = estimate_timestamps(text, 5.0);

    assert_eq!(timings.len(), 9);
    let words: Vec<&str> = timings.iter().map(|t| t.word.as_str()).collect();
    assert_eq!(words, text.split_whitespace().collect::<Vec<_>>());
}

/// Test the normalization contract
#[test]
fn test_estimate_timestamps_withAnyDuration_shouldEndExactlyAtDuration() {
    for duration in [0.5, 2.5, 10.0, 61.3] {
        let timings = estimate_timestamps("Words that should fill the whole narration.", duration);
        let last_end = timings.last().map(|t| t.end).unwrap_or(0.0);
        assert!((last_end - duration).abs() < 1e-9, "last end {} != duration {}", last_end, duration);
    }
}

/// Test that the timeline is monotonic
#[test]
fn test_estimate_timestamps_withLongText_shouldBeMonotonic() {
    let text = "One two three, four five. Six seven eight nine ten! Eleven twelve.";
    let timings = estimate_timestamps(text, 8.0);

    for timing in &timings {
        assert!(timing.start < timing.end, "word '{}' has no positive span", timing.word);
    }
    for pair in timings.windows(2) {
        assert!(pair[0].end <= pair[1].start + 1e-9, "words overlap: {:?}", pair);
    }
}

/// Test sentence punctuation slowing the word down relative to a comma
#[test]
fn test_estimate_timestamps_withPunctuation_shouldLengthenPunctuatedWords() {
    // Same letters, different trailing punctuation
    let timings = estimate_timestamps("stop. stop,", 4.0);
    assert_eq!(timings.len(), 2);

    let sentence_span = timings[0].end - timings[0].start;
    let comma_span = timings[1].end - timings[1].start;
    assert!(sentence_span > comma_span, "sentence pause should outweigh comma pause");
}

/// Test empty and degenerate inputs
#[test]
fn test_estimate_timestamps_withEmptyInput_shouldReturnEmpty() {
    assert!(estimate_timestamps("", 5.0).is_empty());
    assert!(estimate_timestamps("   ", 5.0).is_empty());
    assert!(estimate_timestamps("hello world", 0.0).is_empty());
    assert!(estimate_timestamps("hello world", -1.0).is_empty());
}

/// Test the linear variant honors the same normalization contract
#[test]
fn test_estimate_timestamps_linear_withText_shouldNormalizeToDuration() {
    let timings = estimate_timestamps_linear("plain flat estimation without heuristics", 6.0);

    assert_eq!(timings.len(), 5);
    let last_end = timings.last().map(|t| t.end).unwrap_or(0.0);
    assert!((last_end - 6.0).abs() < 1e-9);

    // No inter-word gaps in the linear variant
    for pair in timings.windows(2) {
        assert!((pair[0].end - pair[1].start).abs() < 1e-9);
    }
}

/// Test the linear variant on degenerate inputs
#[test]
fn test_estimate_timestamps_linear_withEmptyInput_shouldReturnEmpty() {
    assert!(estimate_timestamps_linear("", 5.0).is_empty());
    assert!(estimate_timestamps_linear("hello", 0.0).is_empty());
}

/// Test the record serialization shape
#[test]
fn test_timestamp_record_withWords_shouldRoundTripThroughJson() {
    let record = TimestampRecord::new(
        "Hello world",
        1.5,
        vec![
            WordTiming::new("Hello", 0.0, 0.7),
            WordTiming::new("world", 0.75, 1.5),
        ],
    );

    let serialized = serde_json::to_string(&record).unwrap();
    let parsed: TimestampRecord = serde_json::from_str(&serialized).unwrap();

    assert_eq!(parsed.text, "Hello world");
    assert_eq!(parsed.duration, 1.5);
    assert_eq!(parsed.words, record.words);
}
