use std::path::PathBuf;

use clap::{Args, Parser, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the emailer binary.
#[derive(Debug, Parser)]
#[command(
    name = "emailer",
    version,
    about = "Generate an HTML email from a document file."
)]
pub struct CliArgs {
    /// Path to the document (YAML or JSON) describing the email.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub document: PathBuf,

    /// Path to the HTML file to write.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub output: PathBuf,

    /// Write the inline-image manifest (content-id → path) as JSON.
    #[arg(long = "manifest", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Optional path to a settings file.
    #[arg(long = "settings-file", env = "EMAILER_SETTINGS_FILE", value_name = "PATH")]
    pub settings_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: SettingsOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SettingsOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Title used when the document does not declare one.
    #[arg(long = "default-title", value_name = "TEXT")]
    pub default_title: Option<String>,

    /// Container width used when the document has no `layout.width`.
    #[arg(long = "default-layout-width", value_name = "CSS")]
    pub default_layout_width: Option<String>,

    /// Declare inlined images by extension-guessed type instead of image/jpeg.
    #[arg(
        long = "guess-mime-type",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub guess_mime_type: Option<bool>,
}
