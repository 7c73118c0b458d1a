//! CLI argument definitions for the toolbox.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use toolbox_model::{EcLevel, QrOptions};

#[derive(Parser)]
#[command(
    name = "toolbox",
    version,
    about = "Developer toolbox - format, convert, generate and inspect text",
    long_about = "Run the developer toolbox from the terminal.\n\n\
                  Every tool takes text in and gives text (or HTML) out; \
                  panel tools show a live breakdown of a single value."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every tool in the catalog.
    List,

    /// Run a tool on a file or on stdin.
    Run(RunArgs),

    /// Show the live panel of a panel tool for one value.
    Panel(PanelArgs),

    /// Generate or read QR codes.
    #[command(subcommand)]
    Qr(QrCommand),
}

#[derive(Args)]
pub struct RunArgs {
    /// Tool id, as shown by `toolbox list`.
    #[arg(value_name = "TOOL")]
    pub tool: String,

    /// Run the second mode (decode, minify, parse...) of two-mode tools.
    #[arg(long = "decode")]
    pub decode: bool,

    /// Read input from this file instead of stdin.
    #[arg(long = "input", short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Args)]
pub struct PanelArgs {
    /// Panel tool id (color, base64-image, number-base).
    #[arg(value_name = "TOOL")]
    pub tool: String,

    /// Value to show.
    #[arg(value_name = "VALUE", required_unless_present = "file")]
    pub value: Option<String>,

    /// Load an image file instead of a value (base64-image only).
    #[arg(long = "file", value_name = "FILE", conflicts_with = "value")]
    pub file: Option<PathBuf>,

    /// Also print the preview (hex color or image data URL).
    #[arg(long = "preview")]
    pub preview: bool,
}

#[derive(Subcommand)]
pub enum QrCommand {
    /// Encode text as a QR code.
    Encode(QrEncodeArgs),

    /// Decode the QR code in a data URL or PNG file.
    Decode {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct QrEncodeArgs {
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Error correction level.
    #[arg(long = "ec-level", value_enum, default_value = "m")]
    pub ec_level: EcLevelArg,

    /// Quiet zone in modules.
    #[arg(long = "margin", default_value_t = 4)]
    pub margin: u32,

    /// Pixels per module when no size is given.
    #[arg(long = "scale", default_value_t = 8)]
    pub scale: u32,

    /// Target width in pixels.
    #[arg(long = "width", default_value_t = 300)]
    pub width: u32,

    /// Target height in pixels.
    #[arg(long = "height", default_value_t = 300)]
    pub height: u32,

    /// Write a PNG here instead of printing a data URL.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl QrEncodeArgs {
    pub fn options(&self) -> QrOptions {
        QrOptions::new()
            .with_error_correction(self.ec_level.into())
            .with_margin(self.margin)
            .with_scale(self.scale)
            .with_size(Some(self.width), Some(self.height))
    }
}

/// CLI error correction choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum EcLevelArg {
    L,
    M,
    Q,
    H,
}

impl From<EcLevelArg> for EcLevel {
    fn from(level: EcLevelArg) -> Self {
        match level {
            EcLevelArg::L => EcLevel::L,
            EcLevelArg::M => EcLevel::M,
            EcLevelArg::Q => EcLevel::Q,
            EcLevelArg::H => EcLevel::H,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
