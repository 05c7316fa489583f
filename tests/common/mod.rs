/*!
 * Common test utilities for the txt2srt test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Route library logging through env_logger when RUST_LOG is set
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a short text document for conversion tests
pub fn create_test_document(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = "Sentence one. Sentence two. Sentence three. Sentence four.";
    create_test_file(dir, filename, content)
}

/// Owned sentences from string literals
pub fn sentences(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Number of entries directly inside `dir`
pub fn count_entries(dir: &Path) -> Result<usize> {
    Ok(fs::read_dir(dir)?.count())
}
