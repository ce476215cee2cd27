use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::prelude::IndexedRandom;
use tempfile::TempDir;

use crate::file_utils::FileManager;
use crate::media_probe;

// @module: Background clip selection, looping and aspect correction

/// Timeout for the background preparation encode
const PREPARE_TIMEOUT_SECS: u64 = 300;

/// Which geometric transform was actually applied
///
/// Unrecognized crop modes degrade to center cropping; the fallback is
/// recorded here so callers can observe it instead of inferring it from logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropApplied {
    /// Symmetric crop of the excess axis
    Center,
    /// Uniform scale plus letterboxing
    Fit,
    /// Requested mode was not recognized; center cropping was used
    FallbackCenter {
        /// The mode string as configured
        requested: String
    },
}

/// A background stream of exact target duration and dimensions
///
/// Owns the temporary directory holding the prepared clip; dropping the value
/// releases the intermediate file. Owned exclusively by the composer for the
/// duration of one render.
#[derive(Debug)]
pub struct PreparedBackground {
    path: PathBuf,
    /// Target width the stream was scaled to
    pub width: u32,
    /// Target height the stream was scaled to
    pub height: u32,
    /// Exact stream duration in seconds
    pub duration: f64,
    /// Geometric transform that produced the stream
    pub crop_applied: CropApplied,
    workdir: TempDir,
}

impl PreparedBackground {
    /// Path of the prepared clip, valid while this value is alive
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the working directory alive explicitly (silences the unused-field lint)
    fn new(workdir: TempDir, path: PathBuf, width: u32, height: u32, duration: f64, crop_applied: CropApplied) -> Self {
        Self { path, width, height, duration, crop_applied, workdir }
    }

    /// The temp directory backing this clip
    #[allow(dead_code)]
    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }
}

/// Pick a background clip uniformly at random from the configured folder
///
/// Returns `None` when the folder is missing or holds no supported video
/// files; the caller substitutes a solid-color background.
pub fn select_background_clip(background_folder: &Path) -> Result<Option<PathBuf>> {
    let clips = FileManager::find_video_files(background_folder)?;

    if clips.is_empty() {
        return Ok(None);
    }

    let chosen = clips.choose(&mut rand::rng()).cloned();
    Ok(chosen)
}

/// Build the ffmpeg video filter for cropping/scaling to the target geometry
///
/// Pure function over source and target dimensions, so the geometry is
/// testable without running ffmpeg. Always yields a stream of exactly
/// `target_width x target_height` pixels.
pub fn crop_scale_filter(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    target_height: u32,
    crop_mode: &str,
) -> (String, CropApplied) {
    let target_aspect = target_width as f64 / target_height as f64;

    match crop_mode.to_lowercase().as_str() {
        "fit" => {
            let scale = (target_width as f64 / src_width as f64)
                .min(target_height as f64 / src_height as f64);
            let new_w = ((src_width as f64 * scale) as u32).max(2) & !1;
            let new_h = ((src_height as f64 * scale) as u32).max(2) & !1;

            let filter = format!(
                "scale={}:{},pad={}:{}:{}:{}:black",
                new_w,
                new_h,
                target_width,
                target_height,
                (target_width - new_w) / 2,
                (target_height - new_h) / 2,
            );
            (filter, CropApplied::Fit)
        }
        mode => {
            let applied = if mode == "center" {
                CropApplied::Center
            } else {
                CropApplied::FallbackCenter { requested: crop_mode.to_string() }
            };

            let src_aspect = src_width as f64 / src_height as f64;
            let crop = if src_aspect > target_aspect {
                // Source is wider than target: crop width symmetrically
                let new_w = (src_height as f64 * target_aspect) as u32;
                format!("crop={}:{}:{}:0", new_w, src_height, (src_width - new_w) / 2)
            } else {
                // Source is taller than target: crop height symmetrically
                let new_h = (src_width as f64 / target_aspect) as u32;
                format!("crop={}:{}:0:{}", src_width, new_h, (src_height - new_h) / 2)
            };

            let filter = format!("{},scale={}:{}", crop, target_width, target_height);
            (filter, applied)
        }
    }
}

/// Number of input repetitions needed to cover the target duration
pub fn loops_needed(source_duration: f64, target_duration: f64) -> u32 {
    if source_duration <= 0.0 || source_duration >= target_duration {
        return 1;
    }
    (target_duration / source_duration).ceil() as u32
}

/// Loop, crop and scale a source clip to the exact target geometry and duration
pub async fn prepare(
    source_clip: &Path,
    target_duration: f64,
    target_width: u32,
    target_height: u32,
    crop_mode: &str,
) -> Result<PreparedBackground> {
    let source_duration = media_probe::probe_duration(source_clip).await
        .context("Failed to probe background clip duration")?;
    let (src_width, src_height) = media_probe::probe_dimensions(source_clip).await
        .context("Failed to probe background clip dimensions")?;

    let (filter, crop_applied) = crop_scale_filter(
        src_width,
        src_height,
        target_width,
        target_height,
        crop_mode,
    );

    if let CropApplied::FallbackCenter { requested } = &crop_applied {
        warn!("Unrecognized crop mode '{}', using center crop", requested);
    }

    let loops = loops_needed(source_duration, target_duration);
    if loops > 1 {
        debug!(
            "Looping background {} times to cover {:.2}s (source is {:.2}s)",
            loops, target_duration, source_duration
        );
    }

    let workdir = TempDir::new().context("Failed to create background working directory")?;
    let output_path = workdir.path().join("background.mp4");

    let mut args: Vec<String> = vec!["-y".to_string()];
    if loops > 1 {
        args.push("-stream_loop".to_string());
        args.push((loops - 1).to_string());
    }
    args.extend([
        "-i".to_string(),
        source_clip.to_string_lossy().to_string(),
        "-t".to_string(),
        format!("{:.3}", target_duration),
        "-vf".to_string(),
        filter,
        "-an".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        "fast".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        output_path.to_string_lossy().to_string(),
    ]);

    media_probe::run_ffmpeg(&args, PREPARE_TIMEOUT_SECS).await
        .context("Background preparation failed")?;

    info!(
        "Prepared background {:?} -> {}x{} over {:.2}s",
        source_clip.file_name().unwrap_or_default(),
        target_width,
        target_height,
        target_duration
    );

    Ok(PreparedBackground::new(
        workdir,
        output_path,
        target_width,
        target_height,
        target_duration,
        crop_applied,
    ))
}
