/*!
 * Mock narration backend for testing.
 *
 * This module provides a deterministic offline backend that simulates
 * different behaviors:
 * - `MockBackend::working()` - Succeeds with audio bytes and no timings
 * - `MockBackend::with_native_timings()` - Succeeds with backend-supplied word timings
 * - `MockBackend::failing()` - Always fails with an error
 */

use async_trait::async_trait;

use crate::app_config::VoiceProfile;
use crate::errors::ProviderError;
use crate::providers::{SpeechBackend, SynthesisOutput};
use crate::timing::estimate_timestamps_linear;

/// Seconds of simulated audio per input character
const MOCK_SECS_PER_CHAR: f64 = 0.06;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Succeeds with audio bytes, no native timings
    Working,
    /// Succeeds with audio bytes plus native word timings
    NativeTimings,
    /// Always fails with a request error
    Failing,
}

/// Mock narration backend
#[derive(Debug)]
pub struct MockBackend {
    behavior: MockBehavior,
}

impl MockBackend {
    /// A backend that always succeeds without timings
    pub fn working() -> Self {
        Self { behavior: MockBehavior::Working }
    }

    /// A backend that supplies its own word timings
    pub fn with_native_timings() -> Self {
        Self { behavior: MockBehavior::NativeTimings }
    }

    /// A backend that always fails
    pub fn failing() -> Self {
        Self { behavior: MockBehavior::Failing }
    }

    /// Simulated audio duration for the given text
    pub fn simulated_duration(text: &str) -> f64 {
        (text.chars().count() as f64 * MOCK_SECS_PER_CHAR).max(0.5)
    }
}

#[async_trait]
impl SpeechBackend for MockBackend {
    async fn synthesize(&self, text: &str, _voice: &VoiceProfile) -> Result<SynthesisOutput, ProviderError> {
        if self.behavior == MockBehavior::Failing {
            return Err(ProviderError::RequestFailed("Mock backend configured to fail".to_string()));
        }

        let duration = Self::simulated_duration(text);
        let words = match self.behavior {
            MockBehavior::NativeTimings => Some(estimate_timestamps_linear(text, duration)),
            _ => None,
        };

        // A recognizable placeholder payload; never decoded by the pipeline
        let audio = format!("MOCK-MP3:{}", text).into_bytes();

        Ok(SynthesisOutput {
            audio,
            audio_format: "mp3".to_string(),
            words,
            duration_hint: Some(duration),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
