use anyhow::{Result, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::errors::AppError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @checks: Plain text input (.txt, case-insensitive)
    pub fn is_text_file<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("txt"))
    }

    // @generates: Output path for a subtitle file
    // @params: input_file, output_dir, suffix, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        suffix: &str,
        extension: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_dir = output_dir.as_ref();

        // Get the file stem (filename without extension)
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push_str(suffix);
        output_filename.push('.');
        output_filename.push_str(extension);

        output_dir.join(output_filename)
    }

    /// Find files with a specific extension in a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, AppError> {
        fs::read_to_string(&path)
            .map_err(|e| AppError::File(format!("Failed to read file {:?}: {}", path.as_ref(), e)))
    }

    /// Read a file as raw bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, AppError> {
        fs::read(&path)
            .map_err(|e| AppError::File(format!("Failed to read file {:?}: {}", path.as_ref(), e)))
    }

    /// Replace `path` with `content` atomically.
    ///
    /// The content goes to a temporary file in the destination directory and
    /// is renamed over the target only after a successful flush, so readers
    /// see either the old file or the complete new one.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<(), AppError> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .map_err(|e| AppError::File(format!("Failed to create directory {}: {}", parent.display(), e)))?;

        let mut temp = NamedTempFile::new_in(&parent)
            .map_err(|e| AppError::File(format!("Failed to create temporary file in {}: {}", parent.display(), e)))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| AppError::File(format!("Failed to write temporary file for {:?}: {}", path, e)))?;
        temp.as_file().sync_all()
            .map_err(|e| AppError::File(format!("Failed to flush temporary file for {:?}: {}", path, e)))?;

        temp.persist(path)
            .map_err(|e| AppError::File(format!("Failed to move output into place {:?}: {}", path, e.error)))?;

        Ok(())
    }
}
