//! HuggingFace Hub publishing
//!
//! Uploads a probe's weights, descriptive config, and model card to a Hub
//! repository over the HF REST API.
//!
//! # Example
//!
//! ```ignore
//! use publicar::hub::{HfPublisher, PublishConfig};
//!
//! let config = PublishConfig {
//!     repo_id: "yberreby/dinov3-vitb16-lvd1689m-in1k-224x224-linear-clf-probe".to_string(),
//!     ..Default::default()
//! };
//! let publisher = HfPublisher::new(config)?;
//! let result = publisher.publish_model(&probe, &config_json, Some(&card))?;
//! println!("Published: {}", result.repo_url);
//! ```

pub mod auth;
pub mod config;
pub mod model_card;
pub mod publisher;
pub mod result;

pub use auth::{AmbientCredentials, CredentialProvider};
pub use config::PublishConfig;
pub use model_card::ModelCard;
pub use publisher::HfPublisher;
pub use result::{PublishError, PublishResult};

use crate::checkpoint::StateDict;

/// A model that can be serialized and uploaded to the Hub
///
/// Kept separate from the numeric [`Module`](crate::probe::Module)
/// capability: a type opts into Hub publishing by exposing its parameter
/// tensors, nothing more.
pub trait HubPublishable {
    /// Parameter tensors to upload, keyed by canonical name
    fn export_state(&self) -> StateDict;
}
