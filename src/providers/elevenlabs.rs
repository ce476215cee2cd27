use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Serialize;

use crate::app_config::VoiceProfile;
use crate::errors::ProviderError;
use crate::providers::{SpeechBackend, SynthesisOutput};

/// ElevenLabs text-to-speech client
///
/// Uses the configured ElevenLabs voice id; the profile's backend voice name
/// is an OpenAI concept and does not apply here. No native word timings.
#[derive(Debug)]
pub struct ElevenLabsTts {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// ElevenLabs voice identifier
    voice_id: String,
    /// Model identifier
    model_id: String,
    /// API endpoint URL
    endpoint: String,
}

/// ElevenLabs synthesis request body
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// Voice stability tuning for ElevenLabs
#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl ElevenLabsTts {
    /// Create a new ElevenLabs client
    pub fn new(
        api_key: impl Into<String>,
        voice_id: impl Into<String>,
        model_id: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            voice_id: voice_id.into(),
            model_id: model_id.into(),
            endpoint: "https://api.elevenlabs.io".to_string(),
        }
    }

    /// Override the endpoint, for proxies and tests
    #[allow(dead_code)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SpeechBackend for ElevenLabsTts {
    async fn synthesize(&self, text: &str, _voice: &VoiceProfile) -> Result<SynthesisOutput, ProviderError> {
        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.endpoint.trim_end_matches('/'),
            self.voice_id
        );

        let request = SynthesisRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.75,
            },
        };

        debug!("Requesting ElevenLabs synthesis (model {}, voice {})", self.model_id, self.voice_id);

        let response = self.client.post(&url)
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("ElevenLabs request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("ElevenLabs API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let audio = response.bytes().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to read audio bytes: {}", e)))?;

        Ok(SynthesisOutput {
            audio: audio.to_vec(),
            audio_format: "mp3".to_string(),
            words: None,
            duration_hint: None,
        })
    }

    fn name(&self) -> &'static str {
        "elevenlabs"
    }
}
