/*!
 * Integration tests for directory conversion
 */

use std::fs;
use anyhow::Result;

use txt2srt::app_config::Config;
use txt2srt::app_controller::{Controller, FolderSummary};
use crate::common;

/// All .txt files in a tree are converted next to their inputs
#[test]
fn test_run_folder_withNestedTextFiles_shouldConvertAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_document(temp_dir.path(), "one.txt")?;
    common::create_test_document(temp_dir.path(), "sub/two.txt")?;
    common::create_test_file(temp_dir.path(), "readme.md", "Not converted.")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run_folder(temp_dir.path(), None, false)?;

    assert_eq!(summary, FolderSummary { converted: 2, skipped: 0, failed: 0 });
    assert!(temp_dir.path().join("one_subtitles.srt").exists());
    assert!(temp_dir.path().join("sub").join("two_subtitles.srt").exists());
    assert!(!temp_dir.path().join("readme_subtitles.srt").exists());

    Ok(())
}

/// Output directory override collects all results in one place
#[test]
fn test_run_folder_withOutputDir_shouldWriteThere() -> Result<()> {
    let input_dir = common::create_temp_dir()?;
    let output_dir = common::create_temp_dir()?;
    common::create_test_document(input_dir.path(), "a.txt")?;
    common::create_test_document(input_dir.path(), "b.txt")?;

    let controller = Controller::with_config(Config::default())?;
    controller.run_folder(input_dir.path(), Some(output_dir.path()), false)?;

    assert!(output_dir.path().join("a_subtitles.srt").exists());
    assert!(output_dir.path().join("b_subtitles.srt").exists());
    assert_eq!(common::count_entries(input_dir.path())?, 2);

    Ok(())
}

/// Same-named files in different subdirectories keep separate outputs
#[test]
fn test_run_folder_withOutputDirAndDuplicateNames_shouldMirrorSubdirectories() -> Result<()> {
    let input_dir = common::create_temp_dir()?;
    let output_dir = common::create_temp_dir()?;
    common::create_test_file(input_dir.path(), "a/x.txt", "First file.")?;
    common::create_test_file(input_dir.path(), "b/x.txt", "Second file.")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run_folder(input_dir.path(), Some(output_dir.path()), false)?;

    assert_eq!(summary, FolderSummary { converted: 2, skipped: 0, failed: 0 });
    let first = fs::read_to_string(output_dir.path().join("a").join("x_subtitles.srt"))?;
    let second = fs::read_to_string(output_dir.path().join("b").join("x_subtitles.srt"))?;
    assert!(first.contains("First file."));
    assert!(second.contains("Second file."));

    Ok(())
}

/// A second run skips what already exists; failures do not stop the batch
#[test]
fn test_run_folder_withExistingAndBrokenFiles_shouldCountOutcomes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_document(temp_dir.path(), "good.txt")?;
    fs::write(temp_dir.path().join("bad.txt"), [0xffu8, 0xfe])?;

    let controller = Controller::with_config(Config::default())?;

    let first = controller.run_folder(temp_dir.path(), None, false)?;
    assert_eq!(first, FolderSummary { converted: 1, skipped: 0, failed: 1 });

    let second = controller.run_folder(temp_dir.path(), None, false)?;
    assert_eq!(second, FolderSummary { converted: 0, skipped: 1, failed: 1 });

    Ok(())
}

/// Directories without text files are an error
#[test]
fn test_run_folder_withNoTextFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "video.mkv", "")?;

    let controller = Controller::with_config(Config::default())?;
    assert!(controller.run_folder(temp_dir.path(), None, false).is_err());

    Ok(())
}
