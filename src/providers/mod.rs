/*!
 * Provider implementations for narration backends.
 *
 * This module contains client implementations for speech synthesis services:
 * - OpenAI: text-to-speech API integration
 * - ElevenLabs: text-to-speech API integration
 * - Mock: deterministic offline backend for testing
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::{TtsConfig, TtsProvider, VoiceProfile};
use crate::errors::ProviderError;
use crate::timing::WordTiming;

/// Output of a single synthesis request
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// Raw encoded audio bytes
    pub audio: Vec<u8>,

    /// Audio container format ("mp3")
    pub audio_format: String,

    /// Word-level timings when the backend produces them natively
    pub words: Option<Vec<WordTiming>>,

    /// Audio duration in seconds when the backend reports it directly;
    /// otherwise the caller probes the written file
    pub duration_hint: Option<f64>,
}

/// Common trait for all narration backends
///
/// This trait defines the interface that all backend implementations must
/// follow, allowing them to be used interchangeably by the speech gateway.
/// A backend must produce audio bytes and may optionally produce word-level
/// timings; callers obtain timings elsewhere when it does not.
#[async_trait]
pub trait SpeechBackend: Send + Sync + Debug {
    /// Synthesize narration audio for the given text
    ///
    /// # Arguments
    /// * `text` - The script text to narrate
    /// * `voice` - Resolved voice specification; numeric tuning parameters
    ///   (speed, pitch) only take effect here, in the backend itself
    ///
    /// # Returns
    /// * `Result<SynthesisOutput, ProviderError>` - Audio plus optional timings, or an error
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> Result<SynthesisOutput, ProviderError>;

    /// Lowercase backend identifier for logging
    fn name(&self) -> &'static str;
}

/// Resolve the configured provider to a concrete backend
///
/// Selection is a pure mapping from the configuration value, resolved once at
/// pipeline construction. A missing credential is a terminal configuration
/// error surfaced here, before any request is made.
pub fn create_backend(config: &TtsConfig) -> Result<Box<dyn SpeechBackend>, ProviderError> {
    match config.provider {
        TtsProvider::OpenAI => {
            if config.openai_api_key.is_empty() {
                return Err(ProviderError::AuthenticationError(
                    "OpenAI API key required. Set tts.openai_api_key in the configuration.".to_string(),
                ));
            }
            Ok(Box::new(openai::OpenAiTts::new(
                config.openai_api_key.clone(),
                config.model.clone(),
                config.timeout_secs,
            )))
        }
        TtsProvider::ElevenLabs => {
            if config.elevenlabs_api_key.is_empty() {
                return Err(ProviderError::AuthenticationError(
                    "ElevenLabs API key required. Set tts.elevenlabs_api_key in the configuration.".to_string(),
                ));
            }
            Ok(Box::new(elevenlabs::ElevenLabsTts::new(
                config.elevenlabs_api_key.clone(),
                config.elevenlabs_voice_id.clone(),
                config.elevenlabs_model.clone(),
                config.timeout_secs,
            )))
        }
        TtsProvider::Mock => Ok(Box::new(mock::MockBackend::working())),
    }
}

pub mod elevenlabs;
pub mod mock;
pub mod openai;
