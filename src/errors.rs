/*!
 * Error types for the txt2srt application.
 *
 * The caption pipeline reports precondition failures through `CaptionError`;
 * the application shell wraps those together with I/O and configuration
 * failures in `AppError`. All types use the thiserror crate.
 */

use thiserror::Error;

/// Errors raised by the caption-timing pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionError {
    /// Input that is not text or cannot be interpreted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Out-of-range parameter or inconsistent arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors raised while preparing the sentence segmenter
#[derive(Error, Debug)]
pub enum InitError {
    /// A boundary pattern failed to compile
    #[error("Failed to compile sentence boundary pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the caption pipeline
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Error preparing the segmenter
    #[error("Initialization error: {0}")]
    Init(#[from] InitError),

    /// Invalid configuration file or values
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
