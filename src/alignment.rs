use std::time::Duration;
use log::{debug, error};
use reqwest::{multipart, Client};
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::timing::WordTiming;

// @module: Word-level alignment via the Whisper transcription API

/// Whisper alignment client
///
/// Asks the transcription endpoint for word-granularity timestamps on
/// already-synthesized audio. Used by the gateway when the narration backend
/// has no native timing support. Failures here are non-terminal; the caller
/// falls back to estimation.
#[derive(Debug)]
pub struct WhisperAligner {
    /// HTTP client for API requests
    client: Client,
    /// OpenAI API key
    api_key: String,
    /// Transcription model
    model: String,
    /// API endpoint URL
    endpoint: String,
}

/// Deserialized verbose_json transcription response
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    words: Vec<TranscribedWord>,
}

/// One word entry in a verbose_json response
#[derive(Debug, Deserialize)]
struct TranscribedWord {
    word: String,
    start: f64,
    end: f64,
}

impl WhisperAligner {
    /// Create a new aligner. Returns None when no credential is available,
    /// which callers treat as "alignment unavailable" rather than an error.
    pub fn from_api_key(api_key: &str, timeout_secs: u64) -> Option<Self> {
        if api_key.is_empty() {
            return None;
        }
        Some(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.to_string(),
            model: "whisper-1".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
        })
    }

    /// Override the endpoint, for OpenAI-compatible servers
    #[allow(dead_code)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Request word-level timestamps for the given audio bytes
    pub async fn align(&self, audio: Vec<u8>, file_name: &str) -> Result<Vec<WordTiming>, ProviderError> {
        let url = format!("{}/audio/transcriptions", self.endpoint.trim_end_matches('/'));

        let part = multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to build multipart part: {}", e)))?;

        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word");

        debug!("Requesting Whisper word alignment (model {})", self.model);

        let response = self.client.post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Whisper alignment request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Whisper API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let transcription = response.json::<TranscriptionResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse transcription response: {}", e)))?;

        if transcription.words.is_empty() {
            return Err(ProviderError::ParseError(
                "Transcription response contained no word timestamps".to_string(),
            ));
        }

        Ok(transcription.words.into_iter()
            .map(|w| WordTiming::new(w.word.trim(), w.start, w.end))
            .collect())
    }
}
