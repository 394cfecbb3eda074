//! HuggingFace Hub publisher
//!
//! Uploads probe weights, config, and model cards to Hub model
//! repositories using the HF REST API.

use super::auth::{AmbientCredentials, CredentialProvider};
use super::config::PublishConfig;
use super::model_card::ModelCard;
use super::result::{PublishError, PublishResult};
use super::HubPublishable;
use crate::checkpoint;

const HF_API_BASE: &str = "https://huggingface.co/api";

/// Remote filename for the serialized probe weights
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// Remote filename for the descriptive config
pub const CONFIG_FILE: &str = "config.json";

/// HuggingFace Hub publisher
pub struct HfPublisher {
    config: PublishConfig,
    client: reqwest::blocking::Client,
    token: String,
}

impl HfPublisher {
    /// Create a publisher resolving credentials from the ambient chain
    /// (`HF_TOKEN`, then `~/.huggingface/token`)
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::AuthRequired`] when no token can be
    /// resolved, [`PublishError::InvalidRepoId`] unless the configured
    /// repo id is of the form `owner/name`.
    pub fn new(config: PublishConfig) -> Result<Self, PublishError> {
        Self::with_credentials(config, &AmbientCredentials)
    }

    /// Create a publisher with an explicit credential provider
    pub fn with_credentials(
        config: PublishConfig,
        credentials: &dyn CredentialProvider,
    ) -> Result<Self, PublishError> {
        let token = config
            .token
            .clone()
            .or_else(|| credentials.token())
            .ok_or(PublishError::AuthRequired)?;

        if config.repo_id.is_empty() || !config.repo_id.contains('/') {
            return Err(PublishError::InvalidRepoId {
                repo_id: config.repo_id.clone(),
            });
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent("publicar/0.1")
            .build()
            .map_err(|e| PublishError::Http {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            config,
            client,
            token,
        })
    }

    /// Repository ID this publisher uploads to
    #[must_use]
    pub fn repo_id(&self) -> &str {
        &self.config.repo_id
    }

    /// Create the HuggingFace model repository
    ///
    /// POST <https://huggingface.co/api/repos/create>
    pub fn create_repo(&self) -> Result<String, PublishError> {
        let url = format!("{HF_API_BASE}/repos/create");

        let mut body = serde_json::json!({
            "name": self.repo_name(),
            "type": "model",
            "private": self.config.private,
        });

        if let Some(org) = self.repo_org() {
            body["organization"] = serde_json::Value::String(org);
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| PublishError::Http {
                message: format!("Create repo request failed: {e}"),
            })?;

        // 409 = already exists, which is fine
        if response.status().is_success() || response.status().as_u16() == 409 {
            Ok(format!(
                "https://huggingface.co/{}",
                self.config.repo_id
            ))
        } else {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            Err(PublishError::RepoCreationFailed {
                repo_id: self.config.repo_id.clone(),
                message: format!("HTTP {status}: {body}"),
            })
        }
    }

    /// Upload bytes to a path inside the repository
    ///
    /// PUT <https://huggingface.co/api/models/{repo_id}/upload/main/{path}>
    pub fn upload_bytes(&self, content: &[u8], path_in_repo: &str) -> Result<(), PublishError> {
        let url = format!(
            "{HF_API_BASE}/models/{}/upload/main/{}",
            self.config.repo_id, path_in_repo
        );

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .header("Content-Type", "application/octet-stream")
            .body(content.to_vec())
            .send()
            .map_err(|e| PublishError::UploadFailed {
                path: path_in_repo.to_string(),
                message: format!("Upload request failed: {e}"),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            Err(PublishError::UploadFailed {
                path: path_in_repo.to_string(),
                message: format!("HTTP {status}: {body}"),
            })
        }
    }

    /// Full publish flow: create repo → upload weights → upload config →
    /// upload model card
    ///
    /// No step is retried; the first failure propagates and nothing is
    /// considered published.
    pub fn publish_model(
        &self,
        model: &dyn HubPublishable,
        config_json: &serde_json::Value,
        model_card: Option<&ModelCard>,
    ) -> Result<PublishResult, PublishError> {
        let repo_url = self.create_repo()?;

        let weights = checkpoint::to_safetensors(&model.export_state(), None)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;
        self.upload_bytes(&weights, WEIGHTS_FILE)?;

        let config_bytes = serde_json::to_vec_pretty(config_json)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;
        self.upload_bytes(&config_bytes, CONFIG_FILE)?;

        let model_card_uploaded = if let Some(card) = model_card {
            self.upload_bytes(card.to_markdown().as_bytes(), "README.md")?;
            true
        } else {
            false
        };

        Ok(PublishResult {
            repo_url,
            repo_id: self.config.repo_id.clone(),
            files_uploaded: 2,
            model_card_uploaded,
        })
    }

    /// Repository name (part after the last '/')
    fn repo_name(&self) -> &str {
        self.config
            .repo_id
            .rsplit('/')
            .next()
            .unwrap_or(&self.config.repo_id)
    }

    /// Owning namespace (part before '/')
    fn repo_org(&self) -> Option<String> {
        let parts: Vec<&str> = self.config.repo_id.splitn(2, '/').collect();
        if parts.len() == 2 {
            Some(parts[0].to_string())
        } else {
            None
        }
    }
}

impl std::fmt::Debug for HfPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfPublisher")
            .field("repo_id", &self.config.repo_id)
            .field("private", &self.config.private)
            .finish_non_exhaustive()
    }
}
