use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::alignment::WhisperAligner;
use crate::app_config::{TtsConfig, VoiceProfile};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::media_probe;
use crate::providers::{create_backend, SpeechBackend};
use crate::timing::{estimate_timestamps, TimestampRecord};

// @module: Speech synthesis gateway with alignment and estimation fallbacks

/// Where the word-level timings in a [`SpeechResult`] came from
///
/// Exposed so callers and tests can observe which fallback path was taken
/// instead of relying on log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingSource {
    /// The narration backend supplied timings directly
    Native,
    /// A secondary alignment call produced the timings
    Aligned,
    /// Timings were statistically estimated from the text
    Estimated,
}

/// Result of one synthesis request
#[derive(Debug)]
pub struct SpeechResult {
    /// Written narration audio asset
    pub audio_path: PathBuf,

    /// Serialized timestamp record written beside the audio
    pub timestamps_path: PathBuf,

    /// In-memory timing record
    pub record: TimestampRecord,

    /// Which timing path produced the record
    pub timing_source: TimingSource,
}

/// Gateway over interchangeable narration backends
///
/// Synthesis failures are terminal. Alignment failures are not: when the
/// backend has no native timings and the alignment call is unavailable or
/// fails, the gateway estimates timings from the text instead of failing
/// the request.
pub struct SpeechGateway {
    backend: Box<dyn SpeechBackend>,
    aligner: Option<WhisperAligner>,
}

impl SpeechGateway {
    /// Build the gateway from configuration, resolving the backend once
    ///
    /// A missing synthesis credential is a terminal configuration error.
    /// A missing alignment credential only disables the alignment path.
    pub fn from_config(config: &TtsConfig) -> Result<Self, AppError> {
        let backend = create_backend(config)?;
        let aligner = WhisperAligner::from_api_key(&config.openai_api_key, config.timeout_secs);

        if aligner.is_none() {
            debug!("No alignment credential configured; word timings will be estimated when the backend has none");
        }

        Ok(Self { backend, aligner })
    }

    /// Build a gateway around an explicit backend, used by tests
    pub fn with_backend(backend: Box<dyn SpeechBackend>, aligner: Option<WhisperAligner>) -> Self {
        Self { backend, aligner }
    }

    /// Synthesize narration and produce a word-level timestamp record
    ///
    /// Writes `<base_name>.<fmt>` and `<base_name>_timestamps.json` into
    /// `output_dir`.
    pub async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
        output_dir: &Path,
        base_name: &str,
    ) -> Result<SpeechResult> {
        info!("Generating narration with {} backend (voice {})", self.backend.name(), voice.voice);

        let output = self.backend.synthesize(text, voice).await?;

        let audio_file_name = format!("{}.{}", base_name, output.audio_format);
        let audio_path = output_dir.join(&audio_file_name);
        FileManager::write_bytes(&audio_path, &output.audio)?;

        let duration = match output.duration_hint {
            Some(duration) => duration,
            None => media_probe::probe_duration(&audio_path).await
                .context("Failed to probe narration audio duration")?,
        };

        let (words, timing_source) = match output.words {
            Some(words) => (words, TimingSource::Native),
            None => self.obtain_timings(text, output.audio, &audio_file_name, duration).await,
        };

        let record = TimestampRecord::new(text, duration, words);

        let timestamps_path = output_dir.join(format!("{}_timestamps.json", base_name));
        let serialized = serde_json::to_string_pretty(&record)
            .context("Failed to serialize timestamp record")?;
        FileManager::write_to_file(&timestamps_path, &serialized)?;

        debug!(
            "Narration ready: {:.2}s, {} words ({:?} timings)",
            record.duration,
            record.words.len(),
            timing_source
        );

        Ok(SpeechResult {
            audio_path,
            timestamps_path,
            record,
            timing_source,
        })
    }

    /// Alignment call with estimation fallback
    async fn obtain_timings(
        &self,
        text: &str,
        audio: Vec<u8>,
        audio_file_name: &str,
        duration: f64,
    ) -> (Vec<crate::timing::WordTiming>, TimingSource) {
        if let Some(aligner) = &self.aligner {
            match aligner.align(audio, audio_file_name).await {
                Ok(words) => return (words, TimingSource::Aligned),
                Err(e) => {
                    warn!("Word alignment failed, using estimation: {}", e);
                }
            }
        }

        (estimate_timestamps(text, duration), TimingSource::Estimated)
    }
}
