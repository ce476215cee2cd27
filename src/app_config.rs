use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Speech synthesis config
    #[serde(default)]
    pub tts: TtsConfig,

    /// Subtitle rendering config
    #[serde(default)]
    pub subtitles: SubtitleConfig,

    /// Video output config
    #[serde(default)]
    pub video: VideoConfig,

    /// Working directories
    #[serde(default)]
    pub paths: PathConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Speech synthesis provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    // @provider: OpenAI text-to-speech
    #[default]
    OpenAI,
    // @provider: ElevenLabs text-to-speech
    ElevenLabs,
    // @provider: Offline deterministic backend for tests
    Mock,
}

impl TtsProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::ElevenLabs => "ElevenLabs",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::ElevenLabs => "elevenlabs".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

// Implement Display trait for TtsProvider
impl std::fmt::Display for TtsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TtsProvider
impl std::str::FromStr for TtsProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "elevenlabs" => Ok(Self::ElevenLabs),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// A named narration voice profile
///
/// The voice identifier is backend-specific. Speed and pitch are tuning hints
/// that only the narration backend itself acts on.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VoiceProfile {
    /// Backend voice identifier (e.g. "nova" for OpenAI)
    pub voice: String,

    /// Speech rate multiplier
    #[serde(default = "default_voice_speed")]
    pub speed: f32,

    /// Pitch multiplier
    #[serde(default = "default_voice_pitch")]
    pub pitch: f32,
}

impl VoiceProfile {
    pub fn new(voice: impl Into<String>, speed: f32, pitch: f32) -> Self {
        Self { voice: voice.into(), speed, pitch }
    }
}

/// Speech synthesis configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TtsConfig {
    /// Speech provider to use
    #[serde(default)]
    pub provider: TtsProvider,

    /// Model name (e.g. "tts-1" or "tts-1-hd" for OpenAI)
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// Default voice identifier when no profile is selected
    #[serde(default = "default_tts_voice")]
    pub voice: String,

    /// Named voice profiles mapping to backend voices plus tuning hints
    #[serde(default = "default_voice_profiles")]
    pub voice_profiles: BTreeMap<String, VoiceProfile>,

    /// OpenAI API key (also used for Whisper alignment)
    #[serde(default = "String::new")]
    pub openai_api_key: String,

    /// ElevenLabs API key
    #[serde(default = "String::new")]
    pub elevenlabs_api_key: String,

    /// ElevenLabs voice identifier
    #[serde(default = "default_elevenlabs_voice_id")]
    pub elevenlabs_voice_id: String,

    /// ElevenLabs model identifier
    #[serde(default = "default_elevenlabs_model")]
    pub elevenlabs_model: String,

    /// Request timeout in seconds for synthesis and alignment calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            model: default_tts_model(),
            voice: default_tts_voice(),
            voice_profiles: default_voice_profiles(),
            openai_api_key: String::new(),
            elevenlabs_api_key: String::new(),
            elevenlabs_voice_id: default_elevenlabs_voice_id(),
            elevenlabs_model: default_elevenlabs_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TtsConfig {
    /// Resolve a voice profile name to a voice specification
    ///
    /// Unknown or absent profile names fall back to the configured default voice.
    pub fn resolve_voice(&self, profile: Option<&str>) -> VoiceProfile {
        if let Some(name) = profile {
            if let Some(found) = self.voice_profiles.get(name) {
                return found.clone();
            }
        }
        VoiceProfile::new(self.voice.clone(), default_voice_speed(), default_voice_pitch())
    }
}

/// Caption vertical placement on the canvas
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubtitlePosition {
    #[default]
    Bottom,
    Center,
    Top,
}

impl SubtitlePosition {
    /// Vertical pixel offset of the caption line on a canvas of the given height
    pub fn y_offset(&self, canvas_height: u32, margin_bottom: u32) -> u32 {
        match self {
            Self::Bottom => canvas_height.saturating_sub(margin_bottom),
            Self::Center => canvas_height / 2,
            Self::Top => margin_bottom,
        }
    }
}

/// Caption file style selection
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleStyle {
    /// Plain line-timed SRT captions
    #[default]
    Standard,
    /// Word-highlighted ASS captions
    Karaoke,
}

impl std::str::FromStr for SubtitleStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "karaoke" => Ok(Self::Karaoke),
            _ => Err(anyhow!("Invalid subtitle style: {}", s)),
        }
    }
}

/// Subtitle rendering configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleConfig {
    /// Caption file style
    #[serde(default)]
    pub style: SubtitleStyle,

    /// Font size in pixels
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Base font color
    #[serde(default = "default_font_color")]
    pub font_color: String,

    /// Stroke/outline color
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,

    /// Stroke width in pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,

    /// Vertical placement on the canvas
    #[serde(default)]
    pub position: SubtitlePosition,

    /// Margin from the bottom in pixels
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: u32,

    /// Highlight color for the currently spoken word (karaoke style)
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,

    /// Maximum words per caption line
    #[serde(default = "default_max_words_per_line")]
    pub max_words_per_line: usize,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            style: SubtitleStyle::default(),
            font_size: default_font_size(),
            font_color: default_font_color(),
            stroke_color: default_stroke_color(),
            stroke_width: default_stroke_width(),
            position: SubtitlePosition::default(),
            margin_bottom: default_margin_bottom(),
            highlight_color: default_highlight_color(),
            max_words_per_line: default_max_words_per_line(),
        }
    }
}

/// Video output configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoConfig {
    /// Output width in pixels
    #[serde(default = "default_video_width")]
    pub width: u32,

    /// Output height in pixels
    #[serde(default = "default_video_height")]
    pub height: u32,

    /// Output frame rate
    #[serde(default = "default_video_fps")]
    pub fps: u32,

    /// Container format
    #[serde(default = "default_video_format")]
    pub format: String,

    /// Video codec
    #[serde(default = "default_video_codec")]
    pub codec: String,

    /// Target bitrate
    #[serde(default = "default_video_bitrate")]
    pub bitrate: String,

    /// Crop mode as written in configuration
    ///
    /// Kept as a free-form string so unrecognized values can degrade to
    /// center cropping instead of failing deserialization.
    #[serde(default = "default_crop_mode")]
    pub crop_mode: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: default_video_width(),
            height: default_video_height(),
            fps: default_video_fps(),
            format: default_video_format(),
            codec: default_video_codec(),
            bitrate: default_video_bitrate(),
            crop_mode: default_crop_mode(),
        }
    }
}

/// Working directory configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathConfig {
    /// Directory of finished renders
    #[serde(default = "default_renders_dir")]
    pub renders: PathBuf,

    /// Folder scanned for background clips
    #[serde(default = "default_background_clips_dir")]
    pub background_clips: PathBuf,

    /// Log file directory
    #[serde(default = "default_logs_dir")]
    pub logs: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            renders: default_renders_dir(),
            background_clips: default_background_clips_dir(),
            logs: default_logs_dir(),
        }
    }
}

impl PathConfig {
    /// Create every configured directory that does not exist yet
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.renders, &self.background_clips, &self.logs] {
            crate::file_utils::FileManager::ensure_dir(dir)?;
        }
        Ok(())
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_tts_voice() -> String {
    "alloy".to_string()
}

fn default_voice_speed() -> f32 {
    1.0
}

fn default_voice_pitch() -> f32 {
    1.0
}

fn default_voice_profiles() -> BTreeMap<String, VoiceProfile> {
    BTreeMap::from([
        ("meme-boy".to_string(), VoiceProfile::new("nova", 1.1, 1.05)),
        ("sigma-narrator".to_string(), VoiceProfile::new("onyx", 0.95, 0.98)),
        ("uwu".to_string(), VoiceProfile::new("shimmer", 1.15, 1.2)),
        ("deep-epic".to_string(), VoiceProfile::new("echo", 0.9, 0.92)),
    ])
}

fn default_elevenlabs_voice_id() -> String {
    // Default: Sarah voice
    "EXAVITQu4vr4xnSDxMaL".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_turbo_v2_5".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_font_size() -> u32 {
    70
}

fn default_font_color() -> String {
    "white".to_string()
}

fn default_stroke_color() -> String {
    "black".to_string()
}

fn default_stroke_width() -> u32 {
    3
}

fn default_margin_bottom() -> u32 {
    150
}

fn default_highlight_color() -> String {
    "yellow".to_string()
}

fn default_max_words_per_line() -> usize {
    6
}

fn default_video_width() -> u32 {
    1080
}

fn default_video_height() -> u32 {
    1920
}

fn default_video_fps() -> u32 {
    30
}

fn default_video_format() -> String {
    "mp4".to_string()
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_video_bitrate() -> String {
    "5M".to_string()
}

fn default_crop_mode() -> String {
    "center".to_string()
}

fn default_renders_dir() -> PathBuf {
    PathBuf::from("renders")
}

fn default_background_clips_dir() -> PathBuf {
    PathBuf::from("assets/background_clips")
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate API key for all providers except the offline mock
        match self.tts.provider {
            TtsProvider::OpenAI => {
                if self.tts.openai_api_key.is_empty() {
                    return Err(anyhow!("An API key is required for the OpenAI provider"));
                }
            },
            TtsProvider::ElevenLabs => {
                if self.tts.elevenlabs_api_key.is_empty() {
                    return Err(anyhow!("An API key is required for the ElevenLabs provider"));
                }
            },
            TtsProvider::Mock => {}
        }

        if self.video.width == 0 || self.video.height == 0 {
            return Err(anyhow!("Video dimensions must be non-zero"));
        }

        if self.video.fps == 0 {
            return Err(anyhow!("Video frame rate must be non-zero"));
        }

        if self.subtitles.max_words_per_line == 0 {
            return Err(anyhow!("max_words_per_line must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            tts: TtsConfig::default(),
            subtitles: SubtitleConfig::default(),
            video: VideoConfig::default(),
            paths: PathConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
