use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{info, warn};

use crate::app_config::{SubtitleConfig, VideoConfig};
use crate::background::PreparedBackground;
use crate::errors::SubtitleError;
use crate::media_probe;
use crate::subtitles::segmenter::{segment_words, LineSegment};
use crate::timing::TimestampRecord;

// @module: Final composition of background, narration and caption overlays

/// Timeout for the final encode
const COMPOSE_TIMEOUT_SECS: u64 = 600;

/// Fade-in and fade-out length in seconds
const FADE_SECS: f64 = 0.5;

/// Result of one composition
#[derive(Debug)]
pub struct ComposeOutcome {
    /// Path of the encoded video
    pub video_path: PathBuf,

    /// Whether the fade filters made it into the final encode
    ///
    /// False when the fade pass failed and the render degraded to a
    /// fade-less encode.
    pub fades_applied: bool,
}

/// Compose the final video from background, narration audio and captions
///
/// Captions are burned into the video as one overlay per display line,
/// independent of which caption file format was requested. When no background
/// is supplied a solid black canvas of the narration's duration is
/// synthesized. A 0.5 s fade-in/out is applied; if the faded encode fails the
/// render retries without fades rather than failing.
pub async fn compose(
    background: Option<&PreparedBackground>,
    audio_path: &Path,
    record: &TimestampRecord,
    subtitle_config: &SubtitleConfig,
    video_config: &VideoConfig,
    output_path: &Path,
) -> Result<ComposeOutcome> {
    if record.words.is_empty() {
        return Err(SubtitleError::EmptyTimestamps.into());
    }

    let segments = segment_words(&record.words, subtitle_config.max_words_per_line);

    let args_with_fades = build_ffmpeg_args(
        background,
        audio_path,
        record.duration,
        &segments,
        subtitle_config,
        video_config,
        output_path,
        true,
    );

    match media_probe::run_ffmpeg(&args_with_fades, COMPOSE_TIMEOUT_SECS).await {
        Ok(()) => {
            info!("Composed video with fades: {:?}", output_path);
            Ok(ComposeOutcome { video_path: output_path.to_path_buf(), fades_applied: true })
        }
        Err(e) => {
            warn!("Faded encode failed ({}), retrying without fades", e);
            let args_plain = build_ffmpeg_args(
                background,
                audio_path,
                record.duration,
                &segments,
                subtitle_config,
                video_config,
                output_path,
                false,
            );
            media_probe::run_ffmpeg(&args_plain, COMPOSE_TIMEOUT_SECS).await
                .context("Video composition failed")?;
            info!("Composed video without fades: {:?}", output_path);
            Ok(ComposeOutcome { video_path: output_path.to_path_buf(), fades_applied: false })
        }
    }
}

/// Assemble the full ffmpeg argument list for one composition pass
#[allow(clippy::too_many_arguments)]
fn build_ffmpeg_args(
    background: Option<&PreparedBackground>,
    audio_path: &Path,
    duration: f64,
    segments: &[LineSegment],
    subtitle_config: &SubtitleConfig,
    video_config: &VideoConfig,
    output_path: &Path,
    with_fades: bool,
) -> Vec<String> {
    let mut args: Vec<String> = vec!["-y".to_string()];

    // Input 0: background stream, or a synthesized solid canvas
    match background {
        Some(bg) => {
            args.push("-i".to_string());
            args.push(bg.path().to_string_lossy().to_string());
        }
        None => {
            args.push("-f".to_string());
            args.push("lavfi".to_string());
            args.push("-i".to_string());
            args.push(format!(
                "color=c=black:s={}x{}:d={:.3}:r={}",
                video_config.width, video_config.height, duration, video_config.fps
            ));
        }
    }

    // Input 1: narration audio
    args.push("-i".to_string());
    args.push(audio_path.to_string_lossy().to_string());

    let video_filter = build_video_filter(segments, subtitle_config, video_config, duration, with_fades);
    args.push("-vf".to_string());
    args.push(video_filter);

    if with_fades {
        args.push("-af".to_string());
        args.push(format!(
            "afade=t=in:st=0:d={FADE_SECS},afade=t=out:st={:.3}:d={FADE_SECS}",
            (duration - FADE_SECS).max(0.0)
        ));
    }

    args.extend([
        "-map".to_string(), "0:v".to_string(),
        "-map".to_string(), "1:a".to_string(),
        "-c:v".to_string(), video_config.codec.clone(),
        "-b:v".to_string(), video_config.bitrate.clone(),
        "-r".to_string(), video_config.fps.to_string(),
        "-c:a".to_string(), "aac".to_string(),
        "-preset".to_string(), "medium".to_string(),
        "-pix_fmt".to_string(), "yuv420p".to_string(),
        "-t".to_string(), format!("{:.3}", duration),
        output_path.to_string_lossy().to_string(),
    ]);

    args
}

/// Build the video filter chain: one drawtext overlay per display line,
/// layered in segment order, plus optional fades
fn build_video_filter(
    segments: &[LineSegment],
    subtitle_config: &SubtitleConfig,
    video_config: &VideoConfig,
    duration: f64,
    with_fades: bool,
) -> String {
    let y_pos = subtitle_config.position.y_offset(video_config.height, subtitle_config.margin_bottom);

    let mut filters: Vec<String> = segments.iter()
        .map(|segment| drawtext_overlay(segment, subtitle_config, y_pos))
        .collect();

    if with_fades {
        filters.push(format!("fade=t=in:st=0:d={FADE_SECS}"));
        filters.push(format!(
            "fade=t=out:st={:.3}:d={FADE_SECS}",
            (duration - FADE_SECS).max(0.0)
        ));
    }

    filters.join(",")
}

/// One caption overlay, horizontally centered and active for the segment's
/// `[start, end)` range
///
/// drawtext has no text wrapping, so the on-screen line width cannot be
/// capped to a pixel margin here; it is bounded upstream by the segmenter's
/// `max_words_per_line` instead.
fn drawtext_overlay(segment: &LineSegment, config: &SubtitleConfig, y_pos: u32) -> String {
    format!(
        "drawtext=text='{}':fontsize={}:fontcolor={}:borderw={}:bordercolor={}:\
         x=(w-text_w)/2:y={}:enable='between(t,{:.3},{:.3})'",
        escape_drawtext(&segment.text()),
        config.font_size,
        config.font_color,
        config.stroke_width,
        config.stroke_color,
        y_pos,
        segment.start,
        segment.end,
    )
}

/// Escape caption text for use inside a quoted drawtext value
///
/// Apostrophes are replaced with the typographic variant to avoid
/// terminating the filter's quoted string.
fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\u{2019}")
        .replace(':', "\\:")
        .replace('%', "\\%")
}
