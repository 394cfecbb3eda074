//! CLI argument parsing
//!
//! ```bash
//! publicar publish <CHECKPOINT> [--owner <ns>] [--private] [--dry-run]
//! publicar inspect <CHECKPOINT> [--format text|json]
//! ```

mod cli;

pub use cli::{parse_args, Cli, Command, InspectArgs, OutputFormat, PublishArgs};
