use std::fmt::Write as _;

use crate::app_config::SubtitleConfig;
use crate::errors::SubtitleError;
use crate::subtitles::segmenter::{segment_words, LineSegment};
use crate::timing::WordTiming;

// @module: ASS karaoke caption encoding with per-word highlight tags

/// Encode word timings into ASS content with karaoke word highlighting
///
/// Each display line becomes one dialogue event whose text is a sequence of
/// per-word color/duration spans. An empty word sequence is rejected.
pub fn generate_ass(
    words: &[WordTiming],
    config: &SubtitleConfig,
    canvas_height: u32,
) -> Result<String, SubtitleError> {
    if words.is_empty() {
        return Err(SubtitleError::EmptyTimestamps);
    }

    let y_pos = config.position.y_offset(canvas_height, config.margin_bottom);
    let margin_v = canvas_height.saturating_sub(y_pos);

    let mut out = String::new();
    let _ = writeln!(out, "[Script Info]");
    let _ = writeln!(out, "Title: Karaoke Captions");
    let _ = writeln!(out, "ScriptType: v4.00+");
    let _ = writeln!(out);
    let _ = writeln!(out, "[V4+ Styles]");
    let _ = writeln!(
        out,
        "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, \
         Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, \
         Alignment, MarginL, MarginR, MarginV, Encoding"
    );
    let _ = writeln!(
        out,
        "Style: Default,Arial,{},&H00{},&H000000FF,&H00{},&H80000000,1,0,0,0,100,100,0,0,1,{},0,5,10,10,{},1",
        config.font_size,
        color_to_ass(&config.font_color),
        color_to_ass(&config.stroke_color),
        config.stroke_width,
        margin_v,
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "[Events]");
    let _ = writeln!(out, "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text");

    let segments = segment_words(words, config.max_words_per_line);
    for line in &segments {
        let karaoke_text = karaoke_line(line, &config.font_color, &config.highlight_color);
        let _ = writeln!(
            out,
            "Dialogue: 0,{},{},Default,,0,0,0,,{}",
            format_ass_time(line.start),
            format_ass_time(line.end),
            karaoke_text,
        );
    }

    Ok(out)
}

/// Build one dialogue line with word-by-word highlighting
///
/// The first word sets the base color and transitions to the highlight color
/// for its own duration; each subsequent word renders highlighted for its
/// duration then reverts to the base color, preceded by a literal space.
pub fn karaoke_line(line: &LineSegment, base_color: &str, highlight_color: &str) -> String {
    let base = color_to_ass(base_color);
    let highlight = color_to_ass(highlight_color);

    let mut parts = String::new();
    for (i, word) in line.words.iter().enumerate() {
        let duration = highlight_duration_cs(word, line.start);

        if i == 0 {
            let _ = write!(parts, "{{\\c&H{}&}}{{\\k{}}}{}", base, duration, word.word);
        } else {
            let _ = write!(
                parts,
                "{{\\c&H{}&}}{{\\k{}}}{{\\c&H{}&}} {}",
                highlight, duration, base, word.word
            );
        }
    }

    parts
}

/// Highlight duration of one word in centiseconds, relative to its line
///
/// Both endpoints are converted to the line's centisecond timeline before
/// subtracting, so durations telescope: summed over a contiguous line they
/// land exactly on the line span instead of accumulating per-word rounding
/// drift.
pub fn highlight_duration_cs(word: &WordTiming, line_start: f64) -> i64 {
    to_centis(word.end - line_start) - to_centis(word.start - line_start)
}

fn to_centis(seconds: f64) -> i64 {
    (seconds * 100.0).round() as i64
}

/// Format seconds as `H:MM:SS.cc`
///
/// Centiseconds are truncated; hours carry no leading zero.
pub fn format_ass_time(seconds: f64) -> String {
    let total_cs = (seconds * 100.0) as u64;
    let hours = total_cs / 360_000;
    let minutes = (total_cs % 360_000) / 6_000;
    let secs = (total_cs % 6_000) / 100;
    let centis = total_cs % 100;

    format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
}

/// Convert a color name or hex triplet to the ASS BGR hex encoding
///
/// This is the single canonical conversion used for every color field in the
/// generated file. Unrecognized names are treated as RGB hex triplets and
/// byte-reversed; anything else falls back to white.
pub fn color_to_ass(color: &str) -> String {
    match color.to_lowercase().as_str() {
        "white" => "FFFFFF".to_string(),
        "black" => "000000".to_string(),
        "yellow" => "00FFFF".to_string(),
        "red" => "0000FF".to_string(),
        "green" => "00FF00".to_string(),
        "blue" => "FF0000".to_string(),
        other => {
            let hex = other.trim_start_matches('#');
            if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                let (r, g, b) = (&hex[0..2], &hex[2..4], &hex[4..6]);
                format!("{}{}{}", b, g, r).to_uppercase()
            } else {
                "FFFFFF".to_string()
            }
        }
    }
}
