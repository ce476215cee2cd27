use serde::{Deserialize, Serialize};

// @module: Word timing records and statistical timestamp estimation

/// Fixed pause inserted before every word except the first, in seconds
const INTER_WORD_GAP_SECS: f64 = 0.05;

/// A single word with its speech start and end offsets in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    /// The spoken word, punctuation included
    pub word: String,

    /// Start offset in seconds
    pub start: f64,

    /// End offset in seconds
    pub end: f64,
}

impl WordTiming {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        WordTiming { word: word.into(), start, end }
    }
}

/// Word-level timing record for one narration
///
/// `duration` is the authoritative total length used for background looping
/// and fade placement. It can differ slightly from the last word's end when
/// the narration backend reports duration independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampRecord {
    /// The narrated text
    pub text: String,

    /// Total audio duration in seconds
    pub duration: f64,

    /// Per-word timings in script order
    pub words: Vec<WordTiming>,
}

impl TimestampRecord {
    pub fn new(text: impl Into<String>, duration: f64, words: Vec<WordTiming>) -> Self {
        TimestampRecord { text: text.into(), duration, words }
    }
}

/// Estimate per-word timestamps from text length and total duration
///
/// Used whenever precise alignment from a backend is unavailable. The model
/// spreads the duration over characters, slows down vowel-dense words and
/// words carrying punctuation, discounts long words, and inserts a small gap
/// between words. The result is normalized so the last word ends exactly at
/// `duration`.
///
/// Returns an empty sequence for empty text or a non-positive duration.
pub fn estimate_timestamps(text: &str, duration: f64) -> Vec<WordTiming> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || duration <= 0.0 {
        return Vec::new();
    }

    let time_per_char = duration / text.chars().count() as f64;
    let mut timings = Vec::with_capacity(words.len());
    let mut current_time = 0.0_f64;

    for (i, word) in words.iter().enumerate() {
        let char_count = word.chars().count();
        let vowel_count = word.chars().filter(|c| "aeiouAEIOU".contains(*c)).count();

        // Words with more vowels tend to be spoken longer
        let mut base_duration = char_count as f64 * time_per_char * (1.0 + vowel_count as f64 * 0.1);

        // Punctuation pauses
        if word.ends_with(['.', '!', '?']) {
            base_duration *= 1.5;
        } else if word.ends_with([',', ';', ':']) {
            base_duration *= 1.25;
        } else if word.ends_with(['\'', '"']) {
            base_duration *= 1.1;
        }

        // Longer words take proportionally less time per character
        if char_count > 8 {
            base_duration *= 0.9;
        }

        let word_gap = if i > 0 { INTER_WORD_GAP_SECS } else { 0.0 };

        timings.push(WordTiming::new(
            *word,
            current_time + word_gap,
            current_time + word_gap + base_duration,
        ));
        current_time += word_gap + base_duration;
    }

    normalize_to_duration(&mut timings, current_time, duration);
    timings
}

/// Flat per-character estimation variant
///
/// Omits the vowel, punctuation and gap heuristics and pads each word by a
/// fixed factor instead. Satisfies the same normalization contract as
/// [`estimate_timestamps`]: the last word ends exactly at `duration`.
pub fn estimate_timestamps_linear(text: &str, duration: f64) -> Vec<WordTiming> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || duration <= 0.0 {
        return Vec::new();
    }

    let time_per_char = duration / text.chars().count() as f64;
    let mut timings = Vec::with_capacity(words.len());
    let mut current_time = 0.0_f64;

    for word in &words {
        let word_duration = word.chars().count() as f64 * time_per_char * 1.2;
        timings.push(WordTiming::new(*word, current_time, current_time + word_duration));
        current_time += word_duration;
    }

    normalize_to_duration(&mut timings, current_time, duration);
    timings
}

/// Scale every timestamp so the accumulated total lands exactly on `duration`
fn normalize_to_duration(timings: &mut [WordTiming], accumulated: f64, duration: f64) {
    if timings.is_empty() || accumulated <= 0.0 {
        return;
    }
    let scale = duration / accumulated;
    for timing in timings.iter_mut() {
        timing.start *= scale;
        timing.end *= scale;
    }
}
