/*!
 * # txt2srt - plain text to timed SRT subtitles
 *
 * Turns a text document into a subtitle track: sentences are grouped into
 * captions and each caption stays on screen for as long as it takes to read
 * at a configured words-per-minute rate.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `segmenter`: Punctuation-based sentence splitting
 * - `captioner`: Sentence grouping and reading-speed durations
 * - `subtitle_processor`: Caption records, timecodes and SRT serialization
 * - `pipeline`: The three stages composed under one configuration
 * - `app_config`: Configuration file management
 * - `file_utils`: File system operations, including atomic writes
 * - `app_controller`: File and folder conversion
 * - `errors`: Custom error types for the application
 *
 * ## Example
 *
 * ```
 * use txt2srt::{CaptionConfig, CaptionPipeline};
 *
 * let pipeline = CaptionPipeline::new(CaptionConfig::default()).unwrap();
 * let srt = pipeline.convert_to_srt("Hello there. How are you?").unwrap();
 * assert!(srt.starts_with("1\n00:00:00,000 --> "));
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod captioner;
pub mod errors;
pub mod file_utils;
pub mod pipeline;
pub mod segmenter;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use captioner::{compute_durations, compute_durations_at, group_sentences, CaptionGroup, TimingPolicy};
pub use errors::{AppError, CaptionError, InitError};
pub use pipeline::{CaptionConfig, CaptionPipeline};
pub use segmenter::{segment, segment_bytes, Segmenter, SegmenterOptions};
pub use subtitle_processor::{build_records, format_timecode, parse_timecode, serialize, CaptionRecord, SrtWriter};
