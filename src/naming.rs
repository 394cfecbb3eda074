//! Probe naming convention
//!
//! Probe checkpoints and their Hub repositories share one naming scheme:
//!
//! ```text
//! dinov3-{slug}-lvd1689m-in1k-{res}x{res}-linear-clf-probe
//! ```
//!
//! where `slug` is the backbone model name without its `dinov3_` prefix
//! (e.g. `vitb16` for `dinov3_vitb16`) and `res` is the eval resolution.
//! A checkpoint filename following the scheme must agree with the metadata
//! stored inside the checkpoint; any other filename is informational only.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Default Hub namespace probes are published under
pub const HUB_OWNER: &str = "yberreby";

/// Backbone name prefix stripped when deriving the slug
pub const MODEL_NAME_PREFIX: &str = "dinov3_";

/// Checkpoint filename pattern. The second resolution integer is not
/// captured: the convention always writes square resolutions, and the
/// authoritative value is the first one. Accepts both the original
/// trainer's `.pt` spelling and this tool's `.safetensors` container.
static FILENAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^dinov3-(?P<slug>[^-]+)-lvd1689m-in1k-(?P<res>\d+)x\d+-linear-clf-probe\.(?:pt|safetensors)$",
    )
    .expect("Invalid filename regex")
});

/// Slug and resolution captured from a conforming filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameParts {
    /// Backbone slug segment
    pub slug: String,
    /// Resolution (first integer of the `{res}x{res}` pair)
    pub res: u32,
}

/// Outcome of the filename consistency check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameCheck {
    /// Filename follows the convention and agrees with the metadata
    Verified,
    /// Filename does not follow the convention; nothing was checked
    Skipped,
}

/// Filename follows the convention but disagrees with checkpoint metadata
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "Filename metadata mismatch!\n  Filename: slug={filename_slug}, res={filename_res}\n  Checkpoint: slug={checkpoint_slug}, res={checkpoint_res}"
)]
pub struct FilenameMismatch {
    /// Slug embedded in the filename
    pub filename_slug: String,
    /// Resolution embedded in the filename
    pub filename_res: u32,
    /// Slug derived from checkpoint metadata
    pub checkpoint_slug: String,
    /// Resolution from checkpoint metadata
    pub checkpoint_res: u32,
}

/// Derive the backbone slug from its full model name
///
/// A literal prefix strip: `dinov3_vitb16` becomes `vitb16`; names without
/// the prefix pass through unchanged.
#[must_use]
pub fn slug_from_model_name(model_name: &str) -> &str {
    model_name.strip_prefix(MODEL_NAME_PREFIX).unwrap_or(model_name)
}

/// Hub repository identifier for a probe
#[must_use]
pub fn repo_id(owner: &str, slug: &str, res: u32) -> String {
    format!("{owner}/dinov3-{slug}-lvd1689m-in1k-{res}x{res}-linear-clf-probe")
}

/// Parse a checkpoint filename against the naming convention
///
/// Returns `None` when the filename does not follow the convention.
#[must_use]
pub fn parse_filename(file_name: &str) -> Option<FilenameParts> {
    let captures = FILENAME_REGEX.captures(file_name)?;
    let slug = captures["slug"].to_string();
    // \d+ capture; only fails on values past u32::MAX
    let res = captures["res"].parse().ok()?;
    Some(FilenameParts { slug, res })
}

/// Check a checkpoint filename against metadata-derived slug and resolution
///
/// Filenames outside the convention are skipped, not rejected.
///
/// # Errors
///
/// Returns [`FilenameMismatch`] when the filename follows the convention
/// but its embedded slug or resolution disagrees with the metadata.
pub fn check_filename(
    file_name: &str,
    slug: &str,
    res: u32,
) -> Result<FilenameCheck, FilenameMismatch> {
    let Some(parts) = parse_filename(file_name) else {
        return Ok(FilenameCheck::Skipped);
    };

    if parts.slug != slug || parts.res != res {
        return Err(FilenameMismatch {
            filename_slug: parts.slug,
            filename_res: parts.res,
            checkpoint_slug: slug.to_string(),
            checkpoint_res: res,
        });
    }

    Ok(FilenameCheck::Verified)
}
