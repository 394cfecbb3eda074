//! Publicar CLI
//!
//! Publishes trained DINOv3 linear classification probes to HuggingFace Hub.
//!
//! # Usage
//!
//! ```bash
//! # Publish a probe checkpoint
//! publicar publish dinov3-vitb16-lvd1689m-in1k-224x224-linear-clf-probe.safetensors
//!
//! # Validate everything without uploading
//! publicar publish checkpoint.safetensors --dry-run
//!
//! # Show checkpoint contents
//! publicar inspect checkpoint.safetensors
//! ```

use clap::Parser;
use publicar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
