// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use txt2srt::app_config::{self, Config};
use txt2srt::app_controller::{ConversionOutcome, Controller};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for txt2srt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// txt2srt - turn plain text into timed SRT subtitles
#[derive(Parser, Debug)]
#[command(name = "txt2srt")]
#[command(version)]
#[command(about = "Convert plain text into an SRT subtitle track")]
#[command(long_about = "txt2srt splits text into sentences, groups them into captions and times each caption by reading speed.

EXAMPLES:
    txt2srt story.txt                      # Writes story_subtitles.srt next to the input
    txt2srt -g 1 -w 180 story.txt          # One sentence per caption at 180 words per minute
    txt2srt --max-duration 6 story.txt     # Never keep a caption longer than 6 seconds
    txt2srt --stdout story.txt             # Print the subtitles instead of writing a file
    txt2srt -f ./chapters/                 # Convert every .txt file in a directory
    txt2srt completions bash > txt2srt.bash

CONFIGURATION:
    Settings are stored in conf.json by default. If the file doesn't exist, a
    default one is created. Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input text file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Sentences per caption
    #[arg(short, long)]
    group_size: Option<usize>,

    /// Reading speed in words per minute
    #[arg(short, long)]
    words_per_minute: Option<f64>,

    /// Shortest caption duration in seconds (0 disables)
    #[arg(long)]
    min_duration: Option<f64>,

    /// Longest caption duration in seconds
    #[arg(long)]
    max_duration: Option<f64>,

    /// Treat every line break as a sentence boundary
    #[arg(long)]
    split_on_newline: bool,

    /// Wrap caption text to this many characters per line
    #[arg(long)]
    max_line_length: Option<usize>,

    /// Directory for generated subtitle files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print subtitles to stdout instead of writing a file
    #[arg(long, conflicts_with = "output_dir")]
    stdout: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Records are filtered by log::max_level, which is adjusted after config load
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "txt2srt", &mut std::io::stdout());
            Ok(())
        }
        None => run_convert(cli),
    }
}

fn run_convert(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let input_path = options.input_path.clone().ok_or_else(|| {
        anyhow!("INPUT_PATH is required when no subcommand is specified")
    })?;

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options);

    config.validate()
        .context("Configuration validation failed")?;

    // Command line level wins over the file
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    if options.stdout {
        if input_path.is_dir() {
            return Err(anyhow!("--stdout needs a single input file: {:?}", input_path));
        }
        let (srt, _) = controller.convert_file(&input_path)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(srt.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    if input_path.is_file() {
        let output_dir = match &options.output_dir {
            Some(dir) => dir.clone(),
            None => input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };

        match controller.run(&input_path, &output_dir, options.force_overwrite)? {
            ConversionOutcome::Written { output_path, .. } => info!("Success: {:?}", output_path),
            ConversionOutcome::Skipped { .. } => {}
        }
    } else if input_path.is_dir() {
        let summary = controller.run_folder(
            &input_path,
            options.output_dir.as_deref(),
            options.force_overwrite,
        )?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to convert", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

// @applies: Command line values on top of the loaded config
fn apply_overrides(config: &mut Config, options: &CommandLineOptions) {
    let captions = &mut config.captions;

    if let Some(group_size) = options.group_size {
        captions.group_size = group_size;
    }
    if let Some(wpm) = options.words_per_minute {
        captions.words_per_minute = wpm;
    }
    if let Some(min) = options.min_duration {
        captions.min_caption_seconds = min;
    }
    if options.max_duration.is_some() {
        captions.max_caption_seconds = options.max_duration;
    }
    if options.split_on_newline {
        captions.split_on_newline = true;
    }
    if options.max_line_length.is_some() {
        captions.max_line_length = options.max_line_length;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}
