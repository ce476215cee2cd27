/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;
use shortvid::app_config::{Config, LogLevel, SubtitlePosition, SubtitleStyle, TtsProvider};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    // Speech defaults
    assert_eq!(config.tts.provider, TtsProvider::OpenAI);
    assert_eq!(config.tts.model, "tts-1");
    assert_eq!(config.tts.voice, "alloy");
    assert_eq!(config.tts.timeout_secs, 120);
    assert!(config.tts.openai_api_key.is_empty());

    // Subtitle defaults
    assert_eq!(config.subtitles.style, SubtitleStyle::Standard);
    assert_eq!(config.subtitles.font_size, 70);
    assert_eq!(config.subtitles.font_color, "white");
    assert_eq!(config.subtitles.highlight_color, "yellow");
    assert_eq!(config.subtitles.max_words_per_line, 6);
    assert_eq!(config.subtitles.margin_bottom, 150);

    // Video defaults
    assert_eq!(config.video.width, 1080);
    assert_eq!(config.video.height, 1920);
    assert_eq!(config.video.fps, 30);
    assert_eq!(config.video.format, "mp4");
    assert_eq!(config.video.codec, "libx264");
    assert_eq!(config.video.crop_mode, "center");

    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test the built-in voice profiles
#[test]
fn test_default_config_withNoParameters_shouldShipVoiceProfiles() {
    let config = Config::default();

    for name in ["meme-boy", "sigma-narrator", "uwu", "deep-epic"] {
        assert!(config.tts.voice_profiles.contains_key(name), "missing profile {}", name);
    }

    let profile = &config.tts.voice_profiles["meme-boy"];
    assert_eq!(profile.voice, "nova");
    assert!((profile.speed - 1.1).abs() < 1e-6);
}

/// Test voice profile resolution and its fallback
#[test]
fn test_resolve_voice_withVariousProfiles_shouldFallBackToDefault() {
    let config = Config::default();

    let named = config.tts.resolve_voice(Some("sigma-narrator"));
    assert_eq!(named.voice, "onyx");

    let unknown = config.tts.resolve_voice(Some("does-not-exist"));
    assert_eq!(unknown.voice, "alloy");
    assert!((unknown.speed - 1.0).abs() < 1e-6);

    let absent = config.tts.resolve_voice(None);
    assert_eq!(absent.voice, "alloy");
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    // Default OpenAI provider requires a key
    assert!(config.validate().is_err());
    config.tts.openai_api_key = "sk-1234567890".to_string();
    assert!(config.validate().is_ok());

    // ElevenLabs requires its own key
    config.tts.provider = TtsProvider::ElevenLabs;
    assert!(config.validate().is_err());
    config.tts.elevenlabs_api_key = "el-1234567890".to_string();
    assert!(config.validate().is_ok());

    // The offline mock needs no credential
    config.tts.provider = TtsProvider::Mock;
    config.tts.openai_api_key.clear();
    config.tts.elevenlabs_api_key.clear();
    assert!(config.validate().is_ok());

    // Degenerate geometry is rejected
    config.video.width = 0;
    assert!(config.validate().is_err());
    config.video.width = 1080;

    config.video.fps = 0;
    assert!(config.validate().is_err());
    config.video.fps = 30;

    config.subtitles.max_words_per_line = 0;
    assert!(config.validate().is_err());
}

/// Test provider parsing and display
#[test]
fn test_tts_provider_withStringConversions_shouldRoundTrip() {
    assert_eq!(TtsProvider::from_str("openai").unwrap(), TtsProvider::OpenAI);
    assert_eq!(TtsProvider::from_str("ElevenLabs").unwrap(), TtsProvider::ElevenLabs);
    assert_eq!(TtsProvider::from_str("MOCK").unwrap(), TtsProvider::Mock);
    assert!(TtsProvider::from_str("espeak").is_err());

    assert_eq!(TtsProvider::OpenAI.to_string(), "openai");
    assert_eq!(TtsProvider::ElevenLabs.display_name(), "ElevenLabs");
}

/// Test subtitle style parsing
#[test]
fn test_subtitle_style_withStringConversions_shouldParseKnownStyles() {
    assert_eq!(SubtitleStyle::from_str("standard").unwrap(), SubtitleStyle::Standard);
    assert_eq!(SubtitleStyle::from_str("Karaoke").unwrap(), SubtitleStyle::Karaoke);
    assert!(SubtitleStyle::from_str("rainbow").is_err());
}

/// Test caption vertical placement math
#[test]
fn test_subtitle_position_withCanvasHeight_shouldComputeOffsets() {
    assert_eq!(SubtitlePosition::Bottom.y_offset(1920, 150), 1770);
    assert_eq!(SubtitlePosition::Center.y_offset(1920, 150), 960);
    assert_eq!(SubtitlePosition::Top.y_offset(1920, 150), 150);
}

/// Test config serialization round trip
#[test]
fn test_config_serialization_withDefaultConfig_shouldRoundTripThroughJson() {
    let config = Config::default();
    let serialized = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&serialized).unwrap();

    assert_eq!(parsed.tts.provider, config.tts.provider);
    assert_eq!(parsed.subtitles.max_words_per_line, config.subtitles.max_words_per_line);
    assert_eq!(parsed.video.height, config.video.height);
    assert_eq!(parsed.paths.background_clips, config.paths.background_clips);
}

/// Test that a sparse config file fills in every default
#[test]
fn test_config_deserialization_withPartialJson_shouldApplyDefaults() {
    let parsed: Config = serde_json::from_str(r#"{"tts": {"provider": "mock"}}"#).unwrap();

    assert_eq!(parsed.tts.provider, TtsProvider::Mock);
    assert_eq!(parsed.tts.model, "tts-1");
    assert_eq!(parsed.video.width, 1080);
    assert_eq!(parsed.subtitles.font_size, 70);
}
