use std::path::Path;
use std::time::Duration;
use log::{debug, error};
use serde_json::{from_str, Value};
use tokio::process::Command;

use crate::errors::MediaError;

// @module: ffprobe/ffmpeg process helpers shared by audio probing,
// background preparation and composition

/// Timeout for probe commands
const PROBE_TIMEOUT_SECS: u64 = 60;

/// Probe the duration of a media file in seconds
pub async fn probe_duration<P: AsRef<Path>>(path: P) -> Result<f64, MediaError> {
    let path = path.as_ref();

    let output = run_tool(
        "ffprobe",
        &[
            "-v", "error",
            "-show_entries", "format=duration",
            "-of", "default=noprint_wrappers=1:nokey=1",
            path.to_str().unwrap_or_default(),
        ],
        PROBE_TIMEOUT_SECS,
    )
    .await?;

    let stdout = String::from_utf8_lossy(&output);
    stdout.trim().parse::<f64>()
        .map_err(|e| MediaError::ProbeParse(format!("Invalid duration '{}': {}", stdout.trim(), e)))
}

/// Probe the pixel dimensions of the first video stream
pub async fn probe_dimensions<P: AsRef<Path>>(path: P) -> Result<(u32, u32), MediaError> {
    let path = path.as_ref();

    let output = run_tool(
        "ffprobe",
        &[
            "-v", "quiet",
            "-print_format", "json",
            "-show_streams",
            "-select_streams", "v:0",
            path.to_str().unwrap_or_default(),
        ],
        PROBE_TIMEOUT_SECS,
    )
    .await?;

    let stdout = String::from_utf8_lossy(&output);
    let json: Value = from_str(&stdout)
        .map_err(|e| MediaError::ProbeParse(format!("Failed to parse ffprobe JSON output: {}", e)))?;

    let stream = json.get("streams")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
        .ok_or_else(|| MediaError::ProbeParse("No video stream found".to_string()))?;

    let width = stream.get("width")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| MediaError::ProbeParse("Video stream has no width".to_string()))? as u32;

    let height = stream.get("height")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| MediaError::ProbeParse("Video stream has no height".to_string()))? as u32;

    Ok((width, height))
}

/// Run ffmpeg with the given arguments, returning filtered stderr on failure
pub async fn run_ffmpeg(args: &[String], timeout_secs: u64) -> Result<(), MediaError> {
    debug!("Running ffmpeg {}", args.join(" "));
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    run_tool("ffmpeg", &arg_refs, timeout_secs).await.map(|_| ())
}

/// Execute a media tool with a timeout, returning its stdout on success
async fn run_tool(tool: &str, args: &[&str], timeout_secs: u64) -> Result<Vec<u8>, MediaError> {
    let command_future = Command::new(tool).args(args).output();

    let timeout_duration = Duration::from_secs(timeout_secs);
    let output = tokio::select! {
        result = command_future => {
            result.map_err(|e| MediaError::ToolUnavailable {
                tool: tool.to_string(),
                message: e.to_string(),
            })?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(MediaError::Timeout { tool: tool.to_string(), seconds: timeout_secs });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("{} failed: {}", tool, filtered);
        return Err(MediaError::ToolFailed {
            tool: tool.to_string(),
            message: filtered,
        });
    }

    Ok(output.stdout)
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "      Metadata:",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "frame=",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p) || trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
