//! Publicar: publish linear classification probes to HuggingFace Hub
//!
//! A probe checkpoint is a safetensors file holding the trained linear
//! layer (`weight`, `bias`) plus JSON metadata describing the backbone it
//! was trained on and its ImageNet validation results. This crate loads
//! such a checkpoint, cross-checks its filename against the probe naming
//! convention, rebuilds the linear layer, and uploads weights, config, and
//! a model card to a Hub repository derived from the checkpoint metadata.
//!
//! # Example
//!
//! ```no_run
//! use publicar::checkpoint::ProbeCheckpoint;
//! use publicar::naming;
//! use publicar::probe::LinearProbe;
//!
//! let ckpt = ProbeCheckpoint::load("probe.safetensors")?;
//! let slug = naming::slug_from_model_name(ckpt.model_name());
//! let (out_features, in_features) = ckpt.weight_dims()?;
//!
//! let mut probe = LinearProbe::new(in_features, out_features);
//! probe.load_state_dict(ckpt.state_dict())?;
//!
//! let repo_id = naming::repo_id(naming::HUB_OWNER, slug, ckpt.image_size());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod hub;
pub mod naming;
pub mod probe;

pub use checkpoint::{CheckpointError, ProbeCheckpoint, StateDict, TensorData};
pub use hub::{HfPublisher, HubPublishable, PublishConfig, PublishError, PublishResult};
pub use probe::{LinearProbe, Module, ProbeError};
