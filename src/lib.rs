/*!
 * # ShortVid - Script-to-short-video renderer
 *
 * A Rust library for turning a narration script into a finished vertical
 * short-form video.
 *
 * ## Features
 *
 * - Synthesize narration audio using configurable TTS providers:
 *   - OpenAI speech API
 *   - ElevenLabs API
 * - Recover per-word timings via transcription alignment, with a
 *   deterministic estimation fallback
 * - Generate caption files (plain SRT or karaoke-highlighted ASS)
 * - Loop, crop and scale a background clip to the target geometry
 * - Compose the final video with burned-in captions and fades via ffmpeg
 * - Persist a metadata record describing each render
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `timing`: Word timing types and estimation heuristics
 * - `speech`: Narration gateway combining synthesis and timing recovery
 * - `alignment`: Word-level transcription alignment
 * - `subtitles`: Caption encoding:
 *   - `subtitles::segmenter`: Grouping words into display lines
 *   - `subtitles::srt`: Plain SRT encoding and parsing
 *   - `subtitles::ass`: Karaoke ASS encoding
 * - `background`: Background clip selection and geometry correction
 * - `composer`: Final ffmpeg composition
 * - `render_pipeline`: End-to-end render orchestration
 * - `media_probe`: ffprobe/ffmpeg subprocess plumbing
 * - `providers`: Client implementations for speech backends:
 *   - `providers::openai`: OpenAI speech API client
 *   - `providers::elevenlabs`: ElevenLabs API client
 *   - `providers::mock`: Offline deterministic backend
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod alignment;
pub mod background;
pub mod composer;
pub mod errors;
pub mod file_utils;
pub mod media_probe;
pub mod providers;
pub mod render_pipeline;
pub mod speech;
pub mod subtitles;
pub mod timing;

// Re-export main types for easier usage
pub use app_config::{Config, SubtitleStyle, TtsProvider, VoiceProfile};
pub use errors::{AppError, MediaError, ProviderError, SubtitleError};
pub use render_pipeline::{RenderMetadata, RenderOptions, RenderPipeline};
pub use speech::{SpeechGateway, SpeechResult, TimingSource};
pub use timing::{TimestampRecord, WordTiming};
