use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Serialize;

use crate::app_config::VoiceProfile;
use crate::errors::ProviderError;
use crate::providers::{SpeechBackend, SynthesisOutput};

/// OpenAI text-to-speech client
///
/// Produces mp3 audio via the speech endpoint. The API does not return word
/// timings, so the gateway aligns the result separately (Whisper) or falls
/// back to estimation.
#[derive(Debug)]
pub struct OpenAiTts {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Model name ("tts-1" or "tts-1-hd")
    model: String,
    /// API endpoint URL
    endpoint: String,
}

/// OpenAI speech request body
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
}

impl OpenAiTts {
    /// Create a new OpenAI TTS client
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Override the endpoint, for self-hosted OpenAI-compatible servers
    #[allow(dead_code)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SpeechBackend for OpenAiTts {
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> Result<SynthesisOutput, ProviderError> {
        let url = format!("{}/audio/speech", self.endpoint.trim_end_matches('/'));

        // Speed outside the default is passed through; pitch has no API field
        let speed = if (voice.speed - 1.0).abs() > f32::EPSILON {
            Some(voice.speed)
        } else {
            None
        };

        let request = SpeechRequest {
            model: &self.model,
            voice: &voice.voice,
            input: text,
            response_format: "mp3",
            speed,
        };

        debug!("Requesting OpenAI speech synthesis (model {}, voice {})", self.model, voice.voice);

        let response = self.client.post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("OpenAI speech request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
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
        "openai"
    }
}
