//! Hub credential resolution
//!
//! Publishers take a [`CredentialProvider`] rather than reading the
//! environment themselves, so tests can inject fixed or empty credentials.

/// Source of Hub API tokens
pub trait CredentialProvider {
    /// Resolve a token, or `None` if no credentials are available
    fn token(&self) -> Option<String>;
}

/// The ambient credential chain used by the CLI
///
/// Resolution order:
/// 1. `HF_TOKEN` environment variable
/// 2. `~/.huggingface/token` file
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbientCredentials;

impl CredentialProvider for AmbientCredentials {
    fn token(&self) -> Option<String> {
        if let Ok(token) = std::env::var("HF_TOKEN") {
            if !token.is_empty() {
                return Some(token);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let token_path = home.join(".huggingface").join("token");
            if let Ok(token) = std::fs::read_to_string(token_path) {
                let token = token.trim().to_string();
                if !token.is_empty() {
                    return Some(token);
                }
            }
        }

        None
    }
}

/// A fixed token, mainly for tests
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Option<String>);

impl CredentialProvider for StaticCredentials {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
