use std::fmt::Write as _;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::subtitles::segmenter::{segment_words, LineSegment};
use crate::timing::WordTiming;

// @module: Plain SRT caption encoding and parsing

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

/// One parsed SRT block
#[derive(Debug, Clone, PartialEq)]
pub struct SrtEntry {
    /// Sequence number, 1-based
    pub index: usize,

    /// Start offset in seconds (millisecond precision)
    pub start: f64,

    /// End offset in seconds (millisecond precision)
    pub end: f64,

    /// Caption text
    pub text: String,
}

/// Encode word timings into SRT content
///
/// Words are grouped into lines by the shared segmenter; each line becomes
/// one numbered block. An empty word sequence is rejected.
pub fn generate_srt(words: &[WordTiming], max_words_per_line: usize) -> Result<String, SubtitleError> {
    if words.is_empty() {
        return Err(SubtitleError::EmptyTimestamps);
    }

    let lines = segment_words(words, max_words_per_line);
    Ok(encode_segments(&lines))
}

/// Encode already-segmented lines into SRT content
pub fn encode_segments(lines: &[LineSegment]) -> String {
    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        let _ = writeln!(out, "{}", idx + 1);
        let _ = writeln!(out, "{} --> {}", format_srt_time(line.start), format_srt_time(line.end));
        let _ = writeln!(out, "{}", line.text());
        let _ = writeln!(out);
    }
    out
}

/// Format seconds as `HH:MM:SS,mmm`
///
/// Milliseconds are truncated, not rounded.
pub fn format_srt_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Parse SRT content back into entries
///
/// Supports the round-trip property: entries generated by [`generate_srt`]
/// parse back to the same `(start, end, text)` triples at millisecond
/// precision.
pub fn parse_srt(content: &str) -> Result<Vec<SrtEntry>, SubtitleError> {
    let mut entries = Vec::new();

    let mut current_index: Option<usize> = None;
    let mut current_times: Option<(f64, f64)> = None;
    let mut current_text = String::new();

    let mut flush = |index: &mut Option<usize>, times: &mut Option<(f64, f64)>, text: &mut String| {
        if let (Some(idx), Some((start, end))) = (index.take(), times.take()) {
            if !text.trim().is_empty() {
                entries.push(SrtEntry {
                    index: idx,
                    start,
                    end,
                    text: text.trim().to_string(),
                });
            }
        }
        text.clear();
    };

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush(&mut current_index, &mut current_times, &mut current_text);
            continue;
        }

        if current_index.is_none() && current_text.is_empty() {
            if let Ok(num) = trimmed.parse::<usize>() {
                current_index = Some(num);
                continue;
            }
        }

        if current_index.is_some() && current_times.is_none() {
            if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                let start = capture_to_seconds(&caps, 1)?;
                let end = capture_to_seconds(&caps, 5)?;
                current_times = Some((start, end));
                continue;
            }
        }

        if current_times.is_some() {
            if !current_text.is_empty() {
                current_text.push('\n');
            }
            current_text.push_str(trimmed);
        }
    }

    flush(&mut current_index, &mut current_times, &mut current_text);

    if entries.is_empty() {
        return Err(SubtitleError::ParseError(
            "No valid caption blocks found in SRT content".to_string(),
        ));
    }

    Ok(entries)
}

/// Convert one timestamp capture group to seconds
fn capture_to_seconds(caps: &regex::Captures, start_idx: usize) -> Result<f64, SubtitleError> {
    let field = |i: usize| -> Result<u64, SubtitleError> {
        caps.get(start_idx + i)
            .ok_or_else(|| SubtitleError::ParseError("Missing timestamp component".to_string()))?
            .as_str()
            .parse::<u64>()
            .map_err(|e| SubtitleError::ParseError(format!("Invalid timestamp component: {}", e)))
    };

    let ms = field(0)? * 3_600_000 + field(1)? * 60_000 + field(2)? * 1_000 + field(3)?;
    Ok(ms as f64 / 1000.0)
}
