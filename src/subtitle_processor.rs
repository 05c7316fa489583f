use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::debug;
use crate::captioner::CaptionGroup;
use crate::errors::CaptionError;

// @module: Caption records, SRT timecodes and serialization

// @const: SRT timecode regex (hours may exceed two digits)
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):([0-5]\d):([0-5]\d),(\d{3})$").unwrap()
});

// @struct: Single timed caption
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionRecord {
    // @field: 1-based sequence number
    pub index: usize,

    // @field: Start offset in seconds
    pub start_seconds: f64,

    // @field: End offset in seconds
    pub end_seconds: f64,

    // @field: Caption text, single line
    pub text: String,
}

impl CaptionRecord {
    // @creates: Validated caption record
    // @validates: Positive index, finite non-negative start, end >= start
    pub fn new(index: usize, start_seconds: f64, end_seconds: f64, text: String) -> Result<Self, CaptionError> {
        if index == 0 {
            return Err(CaptionError::InvalidArgument("caption index must start at 1".to_string()));
        }
        check_seconds(start_seconds)?;
        check_seconds(end_seconds)?;
        if end_seconds < start_seconds {
            return Err(CaptionError::InvalidArgument(format!(
                "caption {} ends at {} before it starts at {}",
                index, end_seconds, start_seconds
            )));
        }

        Ok(CaptionRecord {
            index,
            start_seconds,
            end_seconds,
            text,
        })
    }

    /// Seconds the caption stays on screen
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }

    /// Start time as an SRT timecode
    pub fn format_start_time(&self) -> Result<String, CaptionError> {
        format_timecode(self.start_seconds)
    }

    /// End time as an SRT timecode
    pub fn format_end_time(&self) -> Result<String, CaptionError> {
        format_timecode(self.end_seconds)
    }

    /// SRT block for this record, text wrapped when a width is given
    fn to_block(&self, max_line_length: Option<usize>) -> Result<String, CaptionError> {
        let text = match max_line_length {
            Some(width) => wrap_text(&self.text, width),
            None => self.text.clone(),
        };
        Ok(format!(
            "{}\n{} --> {}\n{}\n",
            self.index,
            self.format_start_time()?,
            self.format_end_time()?,
            text
        ))
    }
}

impl fmt::Display for CaptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_block(None) {
            Ok(block) => f.write_str(&block),
            // Out-of-range offsets have no timecode; show the raw seconds
            Err(_) => write!(
                f,
                "{}\n{} --> {}\n{}\n",
                self.index, self.start_seconds, self.end_seconds, self.text
            ),
        }
    }
}

fn check_seconds(seconds: f64) -> Result<(), CaptionError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(CaptionError::InvalidArgument(format!(
            "time offset must be a non-negative number of seconds, got {}",
            seconds
        )));
    }
    Ok(())
}

/// Relative slack absorbed before truncating to whole milliseconds
const TIMECODE_TOLERANCE: f64 = 1e-12;

/// Format seconds as `HH:MM:SS,mmm`.
///
/// Hours are at least two digits and never roll over into days. Milliseconds
/// are truncated. A relative slack of a few thousand ulps is added first so
/// binary representation error (3661.123 stored as 3661.12299...) does not
/// lose a millisecond, while a value even half a microsecond short of the
/// next millisecond still truncates down.
pub fn format_timecode(seconds: f64) -> Result<String, CaptionError> {
    check_seconds(seconds)?;

    let scaled = seconds * 1_000.0;
    let ms = (scaled + scaled * TIMECODE_TOLERANCE).floor();
    if ms >= u64::MAX as f64 {
        return Err(CaptionError::InvalidArgument(format!(
            "time offset {} is too large to format",
            seconds
        )));
    }
    let ms = ms as u64;

    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    Ok(format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis))
}

/// Parse an `HH:MM:SS,mmm` timecode back into seconds
pub fn parse_timecode(timecode: &str) -> Result<f64, CaptionError> {
    let caps = TIMECODE_REGEX
        .captures(timecode.trim())
        .ok_or_else(|| CaptionError::InvalidInput(format!("Invalid timecode format: {}", timecode)))?;

    let field = |i: usize| -> Result<u64, CaptionError> {
        caps[i]
            .parse::<u64>()
            .map_err(|e| CaptionError::InvalidInput(format!("Invalid timecode {}: {}", timecode, e)))
    };
    let (hours, minutes, secs, millis) = (field(1)?, field(2)?, field(3)?, field(4)?);

    // Hours are unbounded, so the sum can exceed u64
    let total_ms = hours
        .checked_mul(3_600_000)
        .and_then(|ms| ms.checked_add(minutes * 60_000 + secs * 1_000 + millis))
        .ok_or_else(|| CaptionError::InvalidInput(format!("Timecode out of range: {}", timecode)))?;

    Ok(total_ms as f64 / 1_000.0)
}

/// Lay groups end to end on a timeline starting at zero.
///
/// Record `i` starts exactly where record `i - 1` ends, so the track has no
/// gaps and no overlaps.
pub fn build_records(groups: &[CaptionGroup], durations: &[f64]) -> Result<Vec<CaptionRecord>, CaptionError> {
    if groups.len() != durations.len() {
        return Err(CaptionError::InvalidArgument(format!(
            "got {} caption groups but {} durations",
            groups.len(),
            durations.len()
        )));
    }

    let mut records = Vec::with_capacity(groups.len());
    let mut cursor = 0.0_f64;

    for (i, (group, &duration)) in groups.iter().zip(durations).enumerate() {
        check_seconds(duration)?;

        let start = cursor;
        let end = cursor + duration;
        let text = flatten_line_breaks(&group.joined_text());

        records.push(CaptionRecord::new(i + 1, start, end, text)?);
        cursor = end;
    }

    debug!("Built {} caption records spanning {:.3}s", records.len(), cursor);
    Ok(records)
}

fn flatten_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// A word longer than `width` sits alone on its own line; nothing is cut.
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Renders caption records as SRT text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SrtWriter {
    /// Wrap caption text to this many characters per line
    pub max_line_length: Option<usize>,
}

impl SrtWriter {
    pub fn new(max_line_length: Option<usize>) -> Self {
        SrtWriter { max_line_length }
    }

    /// One block per record, separated by a blank line
    pub fn render(&self, records: &[CaptionRecord]) -> Result<String, CaptionError> {
        if self.max_line_length == Some(0) {
            return Err(CaptionError::InvalidArgument(
                "maximum line length must be at least 1".to_string(),
            ));
        }

        let blocks = records
            .iter()
            .map(|record| record.to_block(self.max_line_length))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(blocks.join("\n"))
    }
}

/// Serialize records to SRT without wrapping
pub fn serialize(records: &[CaptionRecord]) -> Result<String, CaptionError> {
    SrtWriter::default().render(records)
}
