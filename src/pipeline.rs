/*!
 * End-to-end text to caption conversion.
 *
 * `CaptionPipeline` ties the stages together under one validated
 * `CaptionConfig`: segment, group, time, build records, serialize.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::captioner::{self, TimingPolicy, DEFAULT_MIN_CAPTION_SECONDS, DEFAULT_WORDS_PER_MINUTE};
use crate::errors::{AppError, CaptionError};
use crate::segmenter::{Segmenter, SegmenterOptions};
use crate::subtitle_processor::{self, CaptionRecord, SrtWriter};

/// Caption layout and timing settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaptionConfig {
    /// Sentences per caption
    #[serde(default = "default_group_size")]
    pub group_size: usize,

    /// Reading speed used for durations
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: f64,

    /// Shortest caption duration in seconds (0 disables the floor)
    #[serde(default = "default_min_caption_seconds")]
    pub min_caption_seconds: f64,

    /// Longest caption duration in seconds
    #[serde(default)]
    pub max_caption_seconds: Option<f64>,

    /// Start a new sentence at every line break
    #[serde(default)]
    pub split_on_newline: bool,

    /// Wrap caption text to this many characters per line
    #[serde(default)]
    pub max_line_length: Option<usize>,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            group_size: default_group_size(),
            words_per_minute: default_words_per_minute(),
            min_caption_seconds: default_min_caption_seconds(),
            max_caption_seconds: None,
            split_on_newline: false,
            max_line_length: None,
        }
    }
}

fn default_group_size() -> usize {
    2
}

fn default_words_per_minute() -> f64 {
    DEFAULT_WORDS_PER_MINUTE
}

fn default_min_caption_seconds() -> f64 {
    DEFAULT_MIN_CAPTION_SECONDS
}

impl CaptionConfig {
    pub fn timing_policy(&self) -> TimingPolicy {
        TimingPolicy::new(self.words_per_minute)
            .with_min_seconds(self.min_caption_seconds)
            .with_max_seconds(self.max_caption_seconds)
    }

    pub fn segmenter_options(&self) -> SegmenterOptions {
        SegmenterOptions {
            split_on_newline: self.split_on_newline,
        }
    }

    /// Reject out-of-range values before any text is processed
    pub fn validate(&self) -> Result<(), CaptionError> {
        if self.group_size < 1 {
            return Err(CaptionError::InvalidArgument(format!(
                "sentences per caption must be at least 1, got {}",
                self.group_size
            )));
        }
        if self.max_line_length == Some(0) {
            return Err(CaptionError::InvalidArgument(
                "maximum line length must be at least 1".to_string(),
            ));
        }
        self.timing_policy().validate()
    }
}

/// A ready-to-use converter for one configuration
#[derive(Debug, Clone)]
pub struct CaptionPipeline {
    config: CaptionConfig,
    segmenter: Segmenter,
}

impl CaptionPipeline {
    /// Validate the configuration and prepare the segmenter
    pub fn new(config: CaptionConfig) -> Result<Self, AppError> {
        config.validate()?;
        let segmenter = Segmenter::initialize(config.segmenter_options())?;
        Ok(Self { config, segmenter })
    }

    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    /// Timed caption records for `text`
    pub fn convert(&self, text: &str) -> Result<Vec<CaptionRecord>, CaptionError> {
        let sentences = self.segmenter.segment(text);
        let groups = captioner::group_sentences(&sentences, self.config.group_size)?;
        let durations = captioner::compute_durations(&groups, &self.config.timing_policy())?;
        let records = subtitle_processor::build_records(&groups, &durations)?;

        debug!(
            "Converted {} sentences into {} captions",
            sentences.len(),
            records.len()
        );
        Ok(records)
    }

    /// Timed caption records for raw bytes, which must be UTF-8
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<Vec<CaptionRecord>, CaptionError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            CaptionError::InvalidInput(format!("input is not valid UTF-8 text: {}", e))
        })?;
        self.convert(text)
    }

    /// Render records with this pipeline's line wrapping
    pub fn render(&self, records: &[CaptionRecord]) -> Result<String, CaptionError> {
        SrtWriter::new(self.config.max_line_length).render(records)
    }

    /// Full conversion straight to SRT text
    pub fn convert_to_srt(&self, text: &str) -> Result<String, CaptionError> {
        let records = self.convert(text)?;
        self.render(&records)
    }
}
