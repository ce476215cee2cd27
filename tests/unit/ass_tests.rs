/*!
 * Tests for ASS karaoke caption encoding
 */

use shortvid::app_config::SubtitleConfig;
use shortvid::errors::SubtitleError;
use shortvid::subtitles::ass::{
    color_to_ass, format_ass_time, generate_ass, highlight_duration_cs, karaoke_line,
};
use shortvid::subtitles::segmenter::LineSegment;
use shortvid::timing::WordTiming;

use crate::common;

/// Test the named color table
#[test]
fn test_color_to_ass_withNamedColors_shouldMapToBgr() {
    assert_eq!(color_to_ass("white"), "FFFFFF");
    assert_eq!(color_to_ass("black"), "000000");
    assert_eq!(color_to_ass("yellow"), "00FFFF");
    assert_eq!(color_to_ass("red"), "0000FF");
    assert_eq!(color_to_ass("green"), "00FF00");
    assert_eq!(color_to_ass("blue"), "FF0000");
}

/// Test hex triplets are byte-reversed into BGR
#[test]
fn test_color_to_ass_withHexTriplet_shouldReverseBytes() {
    assert_eq!(color_to_ass("#FF8800"), "0088FF");
    assert_eq!(color_to_ass("ff8800"), "0088FF");
}

/// Test the white fallback for unknown values
#[test]
fn test_color_to_ass_withUnknownColor_shouldFallBackToWhite() {
    assert_eq!(color_to_ass("chartreuse"), "FFFFFF");
    assert_eq!(color_to_ass("#xyz"), "FFFFFF");
}

/// Test timestamp formatting
#[test]
fn test_format_ass_time_withVariousOffsets_shouldFormatCorrectly() {
    assert_eq!(format_ass_time(0.0), "0:00:00.00");
    assert_eq!(format_ass_time(2.5), "0:00:02.50");
    assert_eq!(format_ass_time(61.25), "0:01:01.25");
    assert_eq!(format_ass_time(3661.75), "1:01:01.75");
}

/// Test that centiseconds are truncated, not rounded
#[test]
fn test_format_ass_time_withSubCentisecondPart_shouldTruncate() {
    assert_eq!(format_ass_time(1.999), "0:00:01.99");
}

/// Test the highlight duration rounding
#[test]
fn test_highlight_duration_cs_withFractionalSpan_shouldRound() {
    assert_eq!(highlight_duration_cs(&WordTiming::new("a", 0.0, 0.5), 0.0), 50);
    assert_eq!(highlight_duration_cs(&WordTiming::new("b", 0.0, 0.334), 0.0), 33);
    assert_eq!(highlight_duration_cs(&WordTiming::new("c", 0.0, 0.336), 0.0), 34);
}

/// Test that durations are measured on the line's own timeline
#[test]
fn test_highlight_duration_cs_withLineOffset_shouldBeLineRelative() {
    let word = WordTiming::new("later", 10.25, 10.75);
    assert_eq!(highlight_duration_cs(&word, 10.25), 50);
    assert_eq!(highlight_duration_cs(&word, 10.0), 50);
}

/// Test the per-word tag sequence of a karaoke line
#[test]
fn test_karaoke_line_withTwoWords_shouldTagEachWord() {
    let line = LineSegment {
        words: vec![
            WordTiming::new("Hello", 0.0, 0.5),
            WordTiming::new("world", 0.5, 1.2),
        ],
        start: 0.0,
        end: 1.2,
    };

    let text = karaoke_line(&line, "white", "yellow");
    assert_eq!(
        text,
        "{\\c&HFFFFFF&}{\\k50}Hello{\\c&H00FFFF&}{\\k70}{\\c&HFFFFFF&} world"
    );
}

fn karaoke_duration_sum(text: &str) -> i64 {
    let mut sum = 0_i64;
    for part in text.split("{\\k").skip(1) {
        let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
        sum += digits.parse::<i64>().unwrap();
    }
    sum
}

/// Test that highlight durations over a contiguous line sum to the line span
#[test]
fn test_karaoke_line_withContiguousWords_shouldSumDurationsToLineSpan() {
    // Four back-to-back 0.125s words; per-word rounding would drift to 52
    let line = LineSegment {
        words: vec![
            WordTiming::new("one", 0.0, 0.125),
            WordTiming::new("two", 0.125, 0.25),
            WordTiming::new("three", 0.25, 0.375),
            WordTiming::new("four", 0.375, 0.5),
        ],
        start: 0.0,
        end: 0.5,
    };

    let text = karaoke_line(&line, "white", "yellow");
    let sum = karaoke_duration_sum(&text);
    let span_cs = ((line.end - line.start) * 100.0).round() as i64;

    assert!((sum - span_cs).abs() <= 1, "sum {} drifted from span {}", sum, span_cs);
}

/// Test the sum property on a line that does not start at zero
#[test]
fn test_karaoke_line_withOffsetLine_shouldSumDurationsToLineSpan() {
    let line = LineSegment {
        words: vec![
            WordTiming::new("offset", 3.005, 3.333),
            WordTiming::new("words", 3.333, 3.666),
            WordTiming::new("here", 3.666, 4.005),
        ],
        start: 3.005,
        end: 4.005,
    };

    let text = karaoke_line(&line, "white", "yellow");
    let sum = karaoke_duration_sum(&text);
    let span_cs = ((line.end - line.start) * 100.0).round() as i64;

    assert!((sum - span_cs).abs() <= 1, "sum {} drifted from span {}", sum, span_cs);
}

/// Test the full document structure
#[test]
fn test_generate_ass_withSampleWords_shouldProduceCompleteDocument() {
    let config = SubtitleConfig::default();
    let content = generate_ass(&common::sample_words(), &config, 1920).unwrap();

    assert!(content.starts_with("[Script Info]"));
    assert!(content.contains("[V4+ Styles]"));
    assert!(content.contains("[Events]"));

    // Default style: 70px Arial, white primary, black outline, width 3,
    // every color field in the same &HAABBGGRR form
    assert!(content.contains("Style: Default,Arial,70,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,1,"));

    // One dialogue for the single display line
    assert_eq!(content.matches("Dialogue:").count(), 1);
    assert!(content.contains("Dialogue: 0,0:00:00.00,0:00:02.50,Default,"));

    // Highlight tags present for the non-leading words
    assert!(content.contains("{\\c&H00FFFF&}"));
}

/// Test the vertical margin derivation
#[test]
fn test_generate_ass_withBottomPosition_shouldDeriveMarginFromOffset() {
    let config = SubtitleConfig::default();
    let content = generate_ass(&common::sample_words(), &config, 1920).unwrap();

    // Bottom placement: y = 1920 - 150, margin_v = 1920 - y = 150
    assert!(content.contains(",5,10,10,150,1"));
}

/// Test the empty input error
#[test]
fn test_generate_ass_withNoWords_shouldReturnError() {
    let config = SubtitleConfig::default();
    let result = generate_ass(&[], &config, 1920);
    assert!(matches!(result, Err(SubtitleError::EmptyTimestamps)));
}
