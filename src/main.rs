// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, SubtitleStyle, TtsProvider};
use render_pipeline::{RenderOptions, RenderPipeline};

mod alignment;
mod app_config;
mod background;
mod composer;
mod errors;
mod file_utils;
mod media_probe;
mod providers;
mod render_pipeline;
mod speech;
mod subtitles;
mod timing;

/// CLI Wrapper for TtsProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTtsProvider {
    OpenAI,
    ElevenLabs,
    Mock,
}

impl From<CliTtsProvider> for TtsProvider {
    fn from(cli_provider: CliTtsProvider) -> Self {
        match cli_provider {
            CliTtsProvider::OpenAI => TtsProvider::OpenAI,
            CliTtsProvider::ElevenLabs => TtsProvider::ElevenLabs,
            CliTtsProvider::Mock => TtsProvider::Mock,
        }
    }
}

/// CLI Wrapper for SubtitleStyle to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSubtitleStyle {
    Standard,
    Karaoke,
}

impl From<CliSubtitleStyle> for SubtitleStyle {
    fn from(cli_style: CliSubtitleStyle) -> Self {
        match cli_style {
            CliSubtitleStyle::Standard => SubtitleStyle::Standard,
            CliSubtitleStyle::Karaoke => SubtitleStyle::Karaoke,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a script into a short vertical video (default command)
    #[command(alias = "render")]
    Render(RenderArgs),

    /// Generate shell completions for shortvid
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Script text file to narrate
    #[arg(value_name = "SCRIPT_PATH")]
    script_path: Option<PathBuf>,

    /// Inline script text, used instead of a script file
    #[arg(short = 'x', long, conflicts_with = "script_path")]
    text: Option<String>,

    /// Output directory for the render artifacts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Speech provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTtsProvider>,

    /// Named voice profile (e.g. 'meme-boy', 'sigma-narrator')
    #[arg(short, long)]
    voice_profile: Option<String>,

    /// Caption style
    #[arg(short, long, value_enum)]
    subtitle_style: Option<CliSubtitleStyle>,

    /// Background clip to use instead of a random pick
    #[arg(short, long)]
    background: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// ShortVid - Script to short-form video renderer
///
/// Turns a narration script into a finished vertical video with synthesized
/// speech, synchronized captions and a looped background clip.
#[derive(Parser, Debug)]
#[command(name = "shortvid")]
#[command(version = "1.0.0")]
#[command(about = "Script-to-short-video renderer")]
#[command(long_about = "ShortVid narrates a script with a TTS provider, recovers word-level timings, \
generates captions and composes a vertical video over a background clip using ffmpeg.

EXAMPLES:
    shortvid script.txt                          # Render using default config
    shortvid -x \"Hello world\" -o renders        # Render inline text
    shortvid -v meme-boy script.txt              # Use a named voice profile
    shortvid -s karaoke script.txt               # Word-highlighted captions
    shortvid -b clips/parkour.mp4 script.txt     # Pin a specific background clip
    shortvid --log-level debug script.txt        # Render with debug logging
    shortvid completions bash > shortvid.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

SUPPORTED PROVIDERS:
    openai     - OpenAI speech API (requires API key; also enables word alignment)
    elevenlabs - ElevenLabs API (requires API key)
    mock       - Offline deterministic backend for testing")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Script text file to narrate
    #[arg(value_name = "SCRIPT_PATH")]
    script_path: Option<PathBuf>,

    /// Inline script text, used instead of a script file
    #[arg(short = 'x', long, conflicts_with = "script_path")]
    text: Option<String>,

    /// Output directory for the render artifacts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Speech provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTtsProvider>,

    /// Named voice profile (e.g. 'meme-boy', 'sigma-narrator')
    #[arg(short, long)]
    voice_profile: Option<String>,

    /// Caption style
    #[arg(short, long, value_enum)]
    subtitle_style: Option<CliSubtitleStyle>,

    /// Background clip to use instead of a random pick
    #[arg(short, long)]
    background: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "shortvid", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Render(args)) => run_render(args).await,
        None => {
            // Default behavior - use top-level args
            let render_args = RenderArgs {
                script_path: cli.script_path,
                text: cli.text,
                output_dir: cli.output_dir,
                provider: cli.provider,
                voice_profile: cli.voice_profile,
                subtitle_style: cli.subtitle_style,
                background: cli.background,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_render(render_args).await
        }
    }
}

async fn run_render(options: RenderArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(provider) = &options.provider {
            config.tts.provider = provider.clone().into();
        }

        if let Some(style) = &options.subtitle_style {
            config.subtitles.style = style.clone().into();
        }

        if let Some(output_dir) = &options.output_dir {
            config.paths.renders = output_dir.clone();
        }

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(provider) = &options.provider {
            config.tts.provider = provider.clone().into();
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter(&config.log_level));
    }

    // Resolve the script text from the file or the inline argument
    let script_text = match (&options.script_path, &options.text) {
        (Some(path), _) => {
            if !path.exists() {
                return Err(anyhow!("Script file does not exist: {:?}", path));
            }
            file_utils::FileManager::read_to_string(path)?
        }
        (None, Some(text)) => text.clone(),
        (None, None) => {
            return Err(anyhow!("SCRIPT_PATH or --text is required when no subcommand is specified"));
        }
    };

    let script_text = script_text.trim().to_string();
    if script_text.is_empty() {
        return Err(anyhow!("Script text is empty"));
    }

    config.paths.ensure_directories()?;

    let output_dir = options.output_dir.clone().unwrap_or_else(|| config.paths.renders.clone());

    let render_options = RenderOptions {
        voice_profile: options.voice_profile.clone(),
        subtitle_style: options.subtitle_style.map(Into::into),
        background_clip: options.background.clone(),
    };

    let pipeline = RenderPipeline::with_config(config)?;
    let (video_path, metadata) = pipeline.run(&script_text, &output_dir, &render_options).await?;

    info!("Video ready: {:?} ({:.1}s narration)", video_path, metadata.duration);

    Ok(())
}
