/*!
 * Error types for the shortvid application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a speech synthesis or alignment backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error with authentication (missing or rejected credential)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Unknown provider name in configuration
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

/// Errors that can occur during subtitle segmentation and encoding
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Empty word-timestamp sequence reached a subtitle encoder
    #[error("No word timestamps provided")]
    EmptyTimestamps,

    /// Parsing a subtitle file back failed
    #[error("Failed to parse subtitle content: {0}")]
    ParseError(String),
}

/// Errors that can occur while probing or encoding media
#[derive(Error, Debug)]
pub enum MediaError {
    /// ffprobe or ffmpeg could not be executed
    #[error("Failed to execute {tool}: {message}")]
    ToolUnavailable {
        /// Which binary failed to launch
        tool: String,
        /// Underlying error message
        message: String
    },

    /// The media tool ran but reported a failure
    #[error("{tool} failed: {message}")]
    ToolFailed {
        /// Which binary failed
        tool: String,
        /// Filtered stderr output
        message: String
    },

    /// The media tool exceeded its time budget
    #[error("{tool} timed out after {seconds}s")]
    Timeout {
        /// Which binary timed out
        tool: String,
        /// Timeout length in seconds
        seconds: u64
    },

    /// Probe output could not be interpreted
    #[error("Failed to parse probe output: {0}")]
    ProbeParse(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from media probing or encoding
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
