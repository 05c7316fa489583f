/*!
 * Caption grouping and reading-speed timing.
 *
 * Sentences are batched into fixed-size caption groups, and every group gets
 * a display duration proportional to its word count at a configured reading
 * speed, clamped by an optional floor and ceiling.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::CaptionError;

/// Default reading speed in words per minute
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 150.0;

/// Default shortest time a caption stays on screen, in seconds
pub const DEFAULT_MIN_CAPTION_SECONDS: f64 = 1.0;

/// An ordered, non-empty batch of sentences shown as one caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionGroup {
    sentences: Vec<String>,
}

impl CaptionGroup {
    /// Build a group, rejecting an empty sentence list
    pub fn new(sentences: Vec<String>) -> Result<Self, CaptionError> {
        if sentences.is_empty() {
            return Err(CaptionError::InvalidArgument(
                "a caption group needs at least one sentence".to_string(),
            ));
        }
        Ok(Self { sentences })
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Sentences joined by a single space
    pub fn joined_text(&self) -> String {
        self.sentences.join(" ")
    }

    /// Whitespace-separated words across all sentences
    pub fn word_count(&self) -> usize {
        self.sentences
            .iter()
            .map(|sentence| sentence.split_whitespace().count())
            .sum()
    }
}

/// Partition sentences into consecutive groups of `group_size`.
///
/// The last group holds the remainder. An empty sentence list gives an empty
/// group list.
pub fn group_sentences(sentences: &[String], group_size: usize) -> Result<Vec<CaptionGroup>, CaptionError> {
    if group_size < 1 {
        return Err(CaptionError::InvalidArgument(format!(
            "sentences per caption must be at least 1, got {}",
            group_size
        )));
    }

    let groups: Vec<CaptionGroup> = sentences
        .chunks(group_size)
        .map(|chunk| CaptionGroup { sentences: chunk.to_vec() })
        .collect();

    debug!(
        "Grouped {} sentences into {} captions ({} per caption)",
        sentences.len(),
        groups.len(),
        group_size
    );
    Ok(groups)
}

/// Reading-speed parameters that turn word counts into durations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingPolicy {
    /// Assumed reading speed
    pub words_per_minute: f64,

    /// Floor applied to every caption; 0 disables it
    pub min_caption_seconds: f64,

    /// Optional ceiling applied after the floor
    pub max_caption_seconds: Option<f64>,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS_PER_MINUTE)
    }
}

impl TimingPolicy {
    /// Policy at the given speed with the default floor and no ceiling
    pub fn new(words_per_minute: f64) -> Self {
        Self {
            words_per_minute,
            min_caption_seconds: DEFAULT_MIN_CAPTION_SECONDS,
            max_caption_seconds: None,
        }
    }

    pub fn with_min_seconds(mut self, seconds: f64) -> Self {
        self.min_caption_seconds = seconds;
        self
    }

    pub fn with_max_seconds(mut self, seconds: Option<f64>) -> Self {
        self.max_caption_seconds = seconds;
        self
    }

    /// Check every parameter is in range
    pub fn validate(&self) -> Result<(), CaptionError> {
        if !self.words_per_minute.is_finite() || self.words_per_minute <= 0.0 {
            return Err(CaptionError::InvalidArgument(format!(
                "words per minute must be a positive number, got {}",
                self.words_per_minute
            )));
        }

        if !self.min_caption_seconds.is_finite() || self.min_caption_seconds < 0.0 {
            return Err(CaptionError::InvalidArgument(format!(
                "minimum caption duration must be non-negative, got {}",
                self.min_caption_seconds
            )));
        }

        if let Some(max) = self.max_caption_seconds {
            if !max.is_finite() || max <= 0.0 || max < self.min_caption_seconds {
                return Err(CaptionError::InvalidArgument(format!(
                    "maximum caption duration {} must be positive and at least the minimum {}",
                    max, self.min_caption_seconds
                )));
            }
        }

        Ok(())
    }

    /// Duration in seconds for a caption with `word_count` words
    pub fn duration_for(&self, word_count: usize) -> f64 {
        let raw = (word_count as f64 / self.words_per_minute) * 60.0;
        let floored = raw.max(self.min_caption_seconds);
        match self.max_caption_seconds {
            Some(max) => floored.min(max),
            None => floored,
        }
    }
}

/// One display duration per group, in group order
pub fn compute_durations(groups: &[CaptionGroup], policy: &TimingPolicy) -> Result<Vec<f64>, CaptionError> {
    policy.validate()?;

    Ok(groups
        .iter()
        .map(|group| policy.duration_for(group.word_count()))
        .collect())
}

/// Durations at `words_per_minute` with the default floor
pub fn compute_durations_at(groups: &[CaptionGroup], words_per_minute: f64) -> Result<Vec<f64>, CaptionError> {
    compute_durations(groups, &TimingPolicy::new(words_per_minute))
}
