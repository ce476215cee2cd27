use crate::timing::WordTiming;

// @module: Grouping word timings into caption display lines

/// A contiguous run of words grouped for simultaneous on-screen display
///
/// Retains per-word detail so the karaoke encoder can emit highlight tags;
/// the plain encoder only uses the joined text.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    /// Words in the line, script order preserved
    pub words: Vec<WordTiming>,

    /// First word's start offset in seconds
    pub start: f64,

    /// Last word's end offset in seconds
    pub end: f64,
}

impl LineSegment {
    /// The display text of the line, words joined by single spaces
    pub fn text(&self) -> String {
        self.words.iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Group word timings into display lines
///
/// A line breaks after appending a word when, in priority order:
/// 1. the line has reached `max_words_per_line` words;
/// 2. the word ends with a sentence terminator (`.`, `!`, `?`);
/// 3. the word ends with `,` and the line already has at least 3 words.
///
/// A trailing partial line is flushed as a final segment. Empty input yields
/// an empty sequence; the encoders reject that case themselves.
pub fn segment_words(words: &[WordTiming], max_words_per_line: usize) -> Vec<LineSegment> {
    let mut lines = Vec::new();
    let mut current: Vec<WordTiming> = Vec::new();

    for timing in words {
        current.push(timing.clone());

        let should_break = current.len() >= max_words_per_line
            || timing.word.ends_with(['.', '!', '?'])
            || (timing.word.ends_with(',') && current.len() >= 3);

        if should_break {
            lines.push(flush_line(std::mem::take(&mut current)));
        }
    }

    if !current.is_empty() {
        lines.push(flush_line(current));
    }

    lines
}

fn flush_line(words: Vec<WordTiming>) -> LineSegment {
    let start = words.first().map(|w| w.start).unwrap_or(0.0);
    let end = words.last().map(|w| w.end).unwrap_or(0.0);
    LineSegment { words, start, end }
}
