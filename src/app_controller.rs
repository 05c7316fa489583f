use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::pipeline::CaptionPipeline;

// @module: Application controller for text to subtitle conversion

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    /// Subtitle file written with this many captions
    Written { output_path: PathBuf, captions: usize },
    /// Output already existed and overwrite was not requested
    Skipped { output_path: PathBuf },
}

/// Totals for a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for subtitle generation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Converter built from the caption settings
    pipeline: CaptionPipeline,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let pipeline = CaptionPipeline::new(config.captions.clone())
            .map_err(|e| anyhow!("Failed to prepare caption pipeline: {}", e))?;

        Ok(Self { config, pipeline })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert text to SRT without touching the filesystem
    pub fn convert_text(&self, text: &str) -> Result<String> {
        Ok(self.pipeline.convert_to_srt(text)?)
    }

    /// Output path for `input_file` in `output_dir`
    pub fn output_path_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(
            input_file,
            output_dir,
            &self.config.output.suffix,
            &self.config.output.extension,
        )
    }

    fn check_input(input_file: &Path) -> Result<()> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        if !FileManager::is_text_file(input_file) {
            return Err(anyhow!("Input file must be a .txt file: {:?}", input_file));
        }
        Ok(())
    }

    /// Read a .txt file and render it as SRT, returning the text and caption count
    pub fn convert_file(&self, input_file: &Path) -> Result<(String, usize)> {
        Self::check_input(input_file)?;

        let bytes = FileManager::read_bytes(input_file)?;
        let records = self.pipeline.convert_bytes(&bytes)
            .with_context(|| format!("Failed to convert {:?}", input_file))?;
        let srt = self.pipeline.render(&records)?;

        Ok((srt, records.len()))
    }

    /// Convert one text file and write the subtitle file into `output_dir`
    pub fn run(&self, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<ConversionOutcome> {
        let start_time = std::time::Instant::now();

        Self::check_input(input_file)?;

        let output_path = self.output_path_for(input_file, output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(ConversionOutcome::Skipped { output_path });
        }

        let (srt, captions) = self.convert_file(input_file)?;
        FileManager::write_atomic(&output_path, &srt)?;

        info!(
            "Wrote {} captions to {:?} in {}",
            captions,
            output_path,
            Self::format_duration(start_time.elapsed())
        );

        Ok(ConversionOutcome::Written {
            output_path,
            captions,
        })
    }

    /// Convert every .txt file under `input_dir`.
    ///
    /// Outputs go next to each input unless `output_dir` is given, in which
    /// case the input's subdirectory is mirrored under it. A failing file is
    /// logged and counted; the rest of the folder still runs.
    pub fn run_folder(&self, input_dir: &Path, output_dir: Option<&Path>, force_overwrite: bool) -> Result<FolderSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let text_files = FileManager::find_files(input_dir, "txt")?;
        if text_files.is_empty() {
            return Err(anyhow!("No .txt files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(text_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for text_file in &text_files {
            let file_name = text_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let source_dir = text_file.parent().unwrap_or(input_dir);
            let target_dir = match output_dir {
                Some(dir) => dir.join(source_dir.strip_prefix(input_dir).unwrap_or(Path::new(""))),
                None => source_dir.to_path_buf(),
            };

            match self.run(text_file, &target_dir, force_overwrite) {
                Ok(ConversionOutcome::Written { .. }) => summary.converted += 1,
                Ok(ConversionOutcome::Skipped { .. }) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing {:?}: {:#}", text_file, e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();
        debug!("Folder summary: {:?}", summary);
        info!(
            "Converted {} file(s), skipped {}, failed {}",
            summary.converted, summary.skipped, summary.failed
        );

        Ok(summary)
    }

    /// Human-readable elapsed time
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
