/*!
 * Tests for the composed caption pipeline
 */

use txt2srt::errors::CaptionError;
use txt2srt::pipeline::{CaptionConfig, CaptionPipeline};

fn pipeline(config: CaptionConfig) -> CaptionPipeline {
    CaptionPipeline::new(config).expect("valid config")
}

#[test]
fn test_default_config_shouldHaveDocumentedDefaults() {
    let config = CaptionConfig::default();
    assert_eq!(config.group_size, 2);
    assert_eq!(config.words_per_minute, 150.0);
    assert_eq!(config.min_caption_seconds, 1.0);
    assert_eq!(config.max_caption_seconds, None);
    assert!(!config.split_on_newline);
    assert_eq!(config.max_line_length, None);
}

#[test]
fn test_convert_withFourSentences_shouldProduceTwoTimedCaptions() {
    let config = CaptionConfig { words_per_minute: 120.0, ..CaptionConfig::default() };
    let records = pipeline(config)
        .convert("Sentence one. Sentence two. Sentence three. Sentence four.")
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text, "Sentence one. Sentence two.");
    assert_eq!((records[0].start_seconds, records[0].end_seconds), (0.0, 2.0));
    assert_eq!(records[1].text, "Sentence three. Sentence four.");
    assert_eq!((records[1].start_seconds, records[1].end_seconds), (2.0, 4.0));
}

#[test]
fn test_convert_to_srt_withFourSentences_shouldRenderExactBlocks() {
    let config = CaptionConfig { words_per_minute: 120.0, ..CaptionConfig::default() };
    let srt = pipeline(config)
        .convert_to_srt("Sentence one. Sentence two. Sentence three. Sentence four.")
        .unwrap();

    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:02,000\nSentence one. Sentence two.\n\n\
         2\n00:00:02,000 --> 00:00:04,000\nSentence three. Sentence four.\n"
    );
}

#[test]
fn test_convert_withEmptyText_shouldProduceNothing() {
    let pipeline = pipeline(CaptionConfig::default());
    assert!(pipeline.convert("").unwrap().is_empty());
    assert_eq!(pipeline.convert_to_srt("").unwrap(), "");
}

#[test]
fn test_convert_withSplitOnNewline_shouldSeparateHeading() {
    let config = CaptionConfig {
        group_size: 1,
        split_on_newline: true,
        ..CaptionConfig::default()
    };
    let records = pipeline(config).convert("Chapter One\nIt was dark. It was cold.").unwrap();
    let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Chapter One", "It was dark.", "It was cold."]);
}

#[test]
fn test_convert_withMultilineSentence_shouldFlattenLineBreaks() {
    let config = CaptionConfig { group_size: 1, ..CaptionConfig::default() };
    let records = pipeline(config).convert("A sentence\nacross lines. Next.").unwrap();
    assert_eq!(records[0].text, "A sentence across lines.");
}

#[test]
fn test_convert_bytes_withInvalidUtf8_shouldReturnInvalidInput() {
    let result = pipeline(CaptionConfig::default()).convert_bytes(&[0xff, 0xfe, 0xfd]);
    assert!(matches!(result, Err(CaptionError::InvalidInput(_))));
}

#[test]
fn test_new_withInvalidSettings_shouldFailFast() {
    let bad_configs = [
        CaptionConfig { group_size: 0, ..CaptionConfig::default() },
        CaptionConfig { words_per_minute: 0.0, ..CaptionConfig::default() },
        CaptionConfig { min_caption_seconds: -1.0, ..CaptionConfig::default() },
        CaptionConfig { max_caption_seconds: Some(0.5), ..CaptionConfig::default() },
        CaptionConfig { max_line_length: Some(0), ..CaptionConfig::default() },
    ];

    for config in bad_configs {
        assert!(CaptionPipeline::new(config.clone()).is_err(), "{:?}", config);
    }
}

#[test]
fn test_convert_withLineLength_shouldWrapInRender() {
    let config = CaptionConfig {
        group_size: 1,
        max_line_length: Some(12),
        ..CaptionConfig::default()
    };
    let srt = pipeline(config).convert_to_srt("The quick brown fox jumps.").unwrap();
    assert!(srt.ends_with("The quick\nbrown fox\njumps.\n"));
}
