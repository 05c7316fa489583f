/*!
 * Sentence segmentation for plain text.
 *
 * Boundaries are found with a punctuation heuristic: a sentence ends after
 * `.`, `!` or `?` when whitespace follows. This is not a linguistic
 * tokenizer. Abbreviations ("Dr. Smith"), decimal numbers followed by a
 * space and quoted punctuation ("Stop." she said) are split or kept exactly
 * as the rule dictates, without special cases.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{CaptionError, InitError};

/// Terminal punctuation followed by whitespace
const SENTENCE_BOUNDARY: &str = r"[.!?]\s+";

/// Terminal punctuation followed by whitespace, or any line break
const SENTENCE_OR_LINE_BOUNDARY: &str = r"[.!?]\s+|[^\S\r\n]*(?:\r\n?|\n)\s*";

static DEFAULT_SEGMENTER: Lazy<Segmenter> = Lazy::new(|| Segmenter {
    boundary: Regex::new(SENTENCE_BOUNDARY).expect("sentence boundary pattern is valid"),
});

/// Options controlling where sentence boundaries fall
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmenterOptions {
    /// Treat every line break as a boundary, even without punctuation
    pub split_on_newline: bool,
}

/// Prepared sentence splitter.
///
/// Holding a `Segmenter` means the boundary patterns are compiled and ready;
/// hosts create one with [`Segmenter::initialize`] before converting text.
#[derive(Debug, Clone)]
pub struct Segmenter {
    boundary: Regex,
}

impl Segmenter {
    /// Compile the boundary patterns for the given options
    pub fn initialize(options: SegmenterOptions) -> Result<Self, InitError> {
        let pattern = if options.split_on_newline {
            SENTENCE_OR_LINE_BOUNDARY
        } else {
            SENTENCE_BOUNDARY
        };

        Ok(Self {
            boundary: Regex::new(pattern)?,
        })
    }

    /// Split text into trimmed, non-empty sentences in source order
    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut cursor = 0;

        for boundary in self.boundary.find_iter(text) {
            // Terminal punctuation belongs to the sentence it closes
            let keeps_punctuation = boundary
                .as_str()
                .starts_with(|c| matches!(c, '.' | '!' | '?'));
            let end = if keeps_punctuation {
                boundary.start() + 1
            } else {
                boundary.start()
            };

            push_trimmed(&mut sentences, &text[cursor..end]);
            cursor = boundary.end();
        }

        push_trimmed(&mut sentences, &text[cursor..]);

        debug!("Segmented {} chars into {} sentences", text.len(), sentences.len());
        sentences
    }

    /// Split raw bytes, rejecting anything that is not UTF-8 text
    pub fn segment_bytes(&self, bytes: &[u8]) -> Result<Vec<String>, CaptionError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            CaptionError::InvalidInput(format!("input is not valid UTF-8 text: {}", e))
        })?;
        Ok(self.segment(text))
    }
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Split text with the default (punctuation only) segmenter
pub fn segment(text: &str) -> Vec<String> {
    DEFAULT_SEGMENTER.segment(text)
}

/// Split raw bytes with the default segmenter
pub fn segment_bytes(bytes: &[u8]) -> Result<Vec<String>, CaptionError> {
    DEFAULT_SEGMENTER.segment_bytes(bytes)
}
