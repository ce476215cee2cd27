use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app_config::{Config, SubtitleStyle};
use crate::background::{self, PreparedBackground};
use crate::composer;
use crate::file_utils::FileManager;
use crate::speech::SpeechGateway;
use crate::subtitles::{ass, srt};

// @module: End-to-end render orchestration

/// Per-render options layered over the configuration
#[derive(Debug, Default, Clone)]
pub struct RenderOptions {
    /// Named voice profile; falls back to the default voice when absent or unknown
    pub voice_profile: Option<String>,

    /// Caption file style override
    pub subtitle_style: Option<SubtitleStyle>,

    /// Explicit background clip; a random clip from the configured folder otherwise
    pub background_clip: Option<PathBuf>,
}

/// Output artifact paths recorded in the metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFiles {
    /// Narration audio asset
    pub audio: String,
    /// Caption file (SRT or ASS by style)
    pub subtitles: String,
    /// Final encoded video
    pub video: String,
}

/// Persisted record describing one render
///
/// Written once per render beside the video, never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderMetadata {
    /// The input script text
    pub script: String,
    /// Voice profile name used, if any
    pub voice_profile: Option<String>,
    /// Caption style ("standard" or "karaoke")
    pub subtitle_style: String,
    /// Background clip path, absent when a solid canvas was used
    pub background_clip: Option<String>,
    /// Narration duration in seconds
    pub duration: f64,
    /// Paths of the produced artifacts
    pub output_files: OutputFiles,
    /// Run timestamp, also the artifact base name suffix
    pub timestamp: String,
}

/// Orchestrates one render: narration, captions, background, composition
///
/// Each run owns a private working set in the output directory, named by a
/// timestamp-derived base, so parallel renders to distinct directories never
/// share state. Stage failures propagate; partial artifacts from earlier
/// stages are left on disk for diagnosis.
pub struct RenderPipeline {
    config: Config,
    gateway: SpeechGateway,
}

impl RenderPipeline {
    /// Build the pipeline, resolving the narration backend once
    pub fn with_config(config: Config) -> Result<Self> {
        let gateway = SpeechGateway::from_config(&config.tts)
            .context("Failed to initialize speech gateway")?;
        Ok(Self { config, gateway })
    }

    /// Build a pipeline around an explicit gateway, used by tests
    pub fn with_gateway(config: Config, gateway: SpeechGateway) -> Self {
        Self { config, gateway }
    }

    /// Execute the full render for one script
    pub async fn run(
        &self,
        script_text: &str,
        output_dir: &Path,
        options: &RenderOptions,
    ) -> Result<(PathBuf, RenderMetadata)> {
        let start_time = std::time::Instant::now();

        FileManager::ensure_dir(output_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let base_name = format!("render_{}", timestamp);

        info!("Starting render: {}", base_name);

        let progress = stage_progress_bar();

        // Stage 1: narration with word timings
        progress.set_message("Generating narration");
        let voice = self.config.tts.resolve_voice(options.voice_profile.as_deref());
        let speech = self.gateway
            .synthesize(script_text, &voice, output_dir, &base_name)
            .await?;
        progress.inc(1);

        // Stage 2: caption file
        progress.set_message("Writing captions");
        let style = options.subtitle_style.unwrap_or(self.config.subtitles.style);
        let subtitle_path = self.write_captions(&speech.record.words, style, output_dir, &base_name)?;
        progress.inc(1);

        // Stage 3: background preparation
        progress.set_message("Preparing background");
        let prepared = self.prepare_background(options, speech.record.duration).await?;
        progress.inc(1);

        // Stage 4: composition and encode
        progress.set_message("Composing video");
        let video_path = output_dir.join(format!("{}.{}", base_name, self.config.video.format));
        let outcome = composer::compose(
            prepared.as_ref().map(|(bg, _)| bg),
            &speech.audio_path,
            &speech.record,
            &self.config.subtitles,
            &self.config.video,
            &video_path,
        )
        .await?;
        progress.inc(1);
        progress.finish_and_clear();

        let metadata = RenderMetadata {
            script: script_text.to_string(),
            voice_profile: options.voice_profile.clone(),
            subtitle_style: match style {
                SubtitleStyle::Standard => "standard".to_string(),
                SubtitleStyle::Karaoke => "karaoke".to_string(),
            },
            background_clip: prepared
                .as_ref()
                .map(|(_, source)| source.to_string_lossy().to_string()),
            duration: speech.record.duration,
            output_files: OutputFiles {
                audio: speech.audio_path.to_string_lossy().to_string(),
                subtitles: subtitle_path.to_string_lossy().to_string(),
                video: outcome.video_path.to_string_lossy().to_string(),
            },
            timestamp,
        };

        let metadata_path = output_dir.join(format!("{}_metadata.json", base_name));
        let serialized = serde_json::to_string_pretty(&metadata)
            .context("Failed to serialize render metadata")?;
        FileManager::write_to_file(&metadata_path, &serialized)?;

        info!(
            "Render complete in {:.1}s: {:?}",
            start_time.elapsed().as_secs_f64(),
            outcome.video_path
        );

        Ok((outcome.video_path, metadata))
    }

    /// Encode and persist the caption file for the chosen style
    fn write_captions(
        &self,
        words: &[crate::timing::WordTiming],
        style: SubtitleStyle,
        output_dir: &Path,
        base_name: &str,
    ) -> Result<PathBuf> {
        let (content, extension) = match style {
            SubtitleStyle::Standard => (
                srt::generate_srt(words, self.config.subtitles.max_words_per_line)?,
                "srt",
            ),
            SubtitleStyle::Karaoke => (
                ass::generate_ass(words, &self.config.subtitles, self.config.video.height)?,
                "ass",
            ),
        };

        let path = output_dir.join(format!("{}.{}", base_name, extension));
        FileManager::write_to_file(&path, &content)?;
        Ok(path)
    }

    /// Resolve and prepare the background, degrading to none on failure
    ///
    /// Returns the prepared stream together with the source clip path for the
    /// metadata record.
    async fn prepare_background(
        &self,
        options: &RenderOptions,
        duration: f64,
    ) -> Result<Option<(PreparedBackground, PathBuf)>> {
        let clip = match &options.background_clip {
            Some(path) => Some(path.clone()),
            None => background::select_background_clip(&self.config.paths.background_clips)?,
        };

        let Some(clip) = clip else {
            warn!("No background clip available, using a solid canvas");
            return Ok(None);
        };

        match background::prepare(
            &clip,
            duration,
            self.config.video.width,
            self.config.video.height,
            &self.config.video.crop_mode,
        )
        .await
        {
            Ok(prepared) => Ok(Some((prepared, clip))),
            Err(e) => {
                warn!("Background preparation failed ({}), using a solid canvas", e);
                Ok(None)
            }
        }
    }
}

/// Four-stage progress bar in the application's house style
fn stage_progress_bar() -> ProgressBar {
    let progress = ProgressBar::new(4);
    let template_result = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} stages {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(template_result.progress_chars("█▓▒░"));
    progress
}
