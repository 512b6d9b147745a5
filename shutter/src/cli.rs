//! This file defines the command-line interface (CLI) for the shutter application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "shutter",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Black out personal information in screenshots",
    long_about = "Shutter runs OCR over an image, classifies every recognized text fragment against built-in detectors, your registered keywords and your own regex rules, and writes a copy of the image with every sensitive fragment covered by an opaque black box.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path of the persisted keyword list (JSON array).
    #[arg(
        long = "keywords-file",
        value_name = "FILE",
        env = "SHUTTER_KEYWORDS_FILE",
        global = true,
        help = "Path of the keyword list (defaults to the user config directory)."
    )]
    pub keywords_file: Option<PathBuf>,

    /// Path of the user rule file (YAML).
    #[arg(
        long = "rules-file",
        value_name = "FILE",
        env = "SHUTTER_RULES_FILE",
        global = true,
        help = "Path of the user regex rule file (defaults to the user config directory)."
    )]
    pub rules_file: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `shutter` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detects sensitive text in an image and writes a masked copy.
    #[command(about = "Detect sensitive text in an image and write a masked copy.")]
    Mask(MaskCommand),

    /// Lists detected fragments and whether each would be masked.
    #[command(about = "List detected text fragments and whether each would be masked.")]
    Scan(ScanCommand),

    /// Classifies literal strings against the current rules.
    #[command(about = "Check whether the given strings would be treated as sensitive.")]
    Check {
        /// Texts to classify.
        #[arg(value_name = "TEXT", required = true)]
        texts: Vec<String>,
    },

    /// Manages the registered keyword list.
    #[command(subcommand, about = "Manage registered keywords.")]
    Keywords(ListCommand),

    /// Manages the user regex rule file.
    #[command(subcommand, about = "Manage user regex rules.")]
    Rules(ListCommand),
}

/// Where text fragments come from.
#[derive(Args, Debug, Clone)]
pub struct DetectorArgs {
    /// Precomputed OCR output (RapidOCR JSON shape).
    #[arg(
        long = "ocr-json",
        value_name = "FILE",
        required_unless_present = "ocr_command",
        conflicts_with = "ocr_command",
        help = "Read OCR results from a JSON file instead of running OCR."
    )]
    pub ocr_json: Option<PathBuf>,

    /// External OCR program, given after `--`. The image path is appended as the last argument.
    #[arg(
        value_name = "OCR_COMMAND",
        last = true,
        num_args = 1..,
        help = "OCR program and arguments after `--`; it receives the image path last and must print JSON."
    )]
    pub ocr_command: Vec<String>,
}

/// Arguments for the `mask` command.
#[derive(Parser, Debug)]
pub struct MaskCommand {
    /// Image to mask. It is never modified.
    #[arg(long, short = 'i', value_name = "FILE", help = "Image to read.")]
    pub input: PathBuf,

    /// Where to write the masked image. The format follows the extension.
    #[arg(long, short = 'o', value_name = "FILE", help = "Where to write the masked image.")]
    pub output: PathBuf,

    /// Write a JSON report of every redaction.
    #[arg(long = "report", value_name = "FILE", help = "Write a JSON report of applied redactions.")]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub detector: DetectorArgs,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Image to read.")]
    pub input: PathBuf,

    #[command(flatten)]
    pub detector: DetectorArgs,
}

/// Shared add/remove/list subcommands for keywords and rules.
#[derive(Subcommand, Debug)]
pub enum ListCommand {
    #[command(about = "Add an entry.")]
    Add {
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,
    },
    #[command(about = "Remove an entry.")]
    Remove {
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,
    },
    #[command(about = "List all entries in order.")]
    List,
}
