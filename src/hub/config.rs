//! Publishing configuration

use serde::{Deserialize, Serialize};

/// Configuration for publishing a probe to HuggingFace Hub
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// HuggingFace repository ID (e.g., "owner/my-probe")
    pub repo_id: String,
    /// Whether the repository should be private
    pub private: bool,
    /// HuggingFace API token (if not set, resolved from the credential
    /// provider)
    #[serde(skip)]
    pub token: Option<String>,
    /// License identifier for the model card (e.g., "apache-2.0")
    pub license: Option<String>,
    /// Tags for discoverability
    pub tags: Vec<String>,
}
