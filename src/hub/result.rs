//! Publishing result and error types

use std::fmt;

/// Successful publish result
#[derive(Clone, Debug)]
pub struct PublishResult {
    /// Repository URL on HuggingFace
    pub repo_url: String,
    /// Repository ID
    pub repo_id: String,
    /// Number of files uploaded
    pub files_uploaded: usize,
    /// Whether a model card was uploaded
    pub model_card_uploaded: bool,
}

impl fmt::Display for PublishResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Published to {} ({} files{})",
            self.repo_url,
            self.files_uploaded,
            if self.model_card_uploaded {
                " + model card"
            } else {
                ""
            }
        )
    }
}

/// Errors during publishing
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// No credentials could be resolved
    #[error("Authentication required: set HF_TOKEN or pass an explicit token")]
    AuthRequired,

    /// Repository ID is not of the form `owner/name`
    #[error("Invalid repository ID '{repo_id}': must be 'owner/name'")]
    InvalidRepoId { repo_id: String },

    /// Repository creation failed
    #[error("Failed to create repository '{repo_id}': {message}")]
    RepoCreationFailed { repo_id: String, message: String },

    /// File upload failed
    #[error("Failed to upload '{path}': {message}")]
    UploadFailed { path: String, message: String },

    /// HTTP transport error
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Payload serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_result_display() {
        let result = PublishResult {
            repo_url: "https://huggingface.co/owner/probe".to_string(),
            repo_id: "owner/probe".to_string(),
            files_uploaded: 2,
            model_card_uploaded: true,
        };
        let rendered = result.to_string();
        assert!(rendered.contains("owner/probe"));
        assert!(rendered.contains("2 files"));
        assert!(rendered.contains("model card"));
    }

    #[test]
    fn test_publish_error_display() {
        let err = PublishError::AuthRequired;
        assert!(err.to_string().contains("HF_TOKEN"));

        let err = PublishError::InvalidRepoId {
            repo_id: "bad".into(),
        };
        assert!(err.to_string().contains("bad"));

        let err = PublishError::UploadFailed {
            path: "model.safetensors".into(),
            message: "HTTP 500".into(),
        };
        assert!(err.to_string().contains("model.safetensors"));
    }
}
