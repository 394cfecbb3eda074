//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::naming;

/// Publicar: publish DINOv3 linear probes to HuggingFace Hub
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "publicar")]
#[command(version)]
#[command(about = "Publish trained DINOv3 linear classification probes to HuggingFace Hub")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Publish a probe checkpoint to HuggingFace Hub
    Publish(PublishArgs),

    /// Inspect a probe checkpoint without uploading
    Inspect(InspectArgs),
}

/// Arguments for the publish command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PublishArgs {
    /// Path to the probe checkpoint
    #[arg(value_name = "CHECKPOINT")]
    pub checkpoint: PathBuf,

    /// Hub namespace to publish under
    #[arg(long, default_value = naming::HUB_OWNER)]
    pub owner: String,

    /// Make the repository private
    #[arg(long)]
    pub private: bool,

    /// Skip the model card upload
    #[arg(long)]
    pub no_model_card: bool,

    /// Run every step except the upload
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the inspect command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    /// Path to the probe checkpoint
    #[arg(value_name = "CHECKPOINT")]
    pub checkpoint: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Inspect output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
