//! Probe checkpoint container
//!
//! A probe checkpoint is a safetensors file: the trained parameters live in
//! the tensor body (`weight` of shape `[out_features, in_features]` and
//! `bias` of shape `[out_features]`), while training/evaluation metadata
//! lives in the safetensors `__metadata__` string map as JSON documents.
//!
//! Required metadata entries:
//!
//! - `config_metadata` — object with `model_name` and `image_size`
//! - `val_results` — object with `top1` and `real_top1` in `[0, 1]`
//!
//! Any further metadata entries are carried through verbatim into the
//! published `config.json`.

mod error;

pub use error::CheckpointError;

use safetensors::tensor::TensorView;
use safetensors::{Dtype, SafeTensors};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Parameter tensors keyed by canonical name
pub type StateDict = BTreeMap<String, TensorData>;

/// A single f32 tensor: shape plus row-major data
#[derive(Debug, Clone, PartialEq)]
pub struct TensorData {
    /// Tensor shape
    pub shape: Vec<usize>,
    /// Row-major element data
    pub data: Vec<f32>,
}

impl TensorData {
    /// Create a tensor from shape and row-major data
    ///
    /// # Panics
    ///
    /// Panics if the data length does not match the shape's element count.
    #[must_use]
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Self {
        let numel: usize = shape.iter().product();
        assert_eq!(data.len(), numel, "data length must match shape");
        Self { shape, data }
    }

    /// Number of elements
    #[must_use]
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Element data as little-endian bytes (safetensors body encoding)
    #[must_use]
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_le_bytes()).collect()
    }
}

/// Backbone/training metadata stored under the `config_metadata` key
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigMetadata {
    /// Full backbone model name, e.g. "dinov3_vitb16"
    pub model_name: String,
    /// Training/eval image resolution
    pub image_size: u32,
}

/// ImageNet validation results stored under the `val_results` key
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ValResults {
    /// IN1k val top-1 accuracy in [0, 1]
    pub top1: f64,
    /// IN1k-ReAL top-1 accuracy in [0, 1]
    pub real_top1: f64,
}

/// A deserialized probe checkpoint
#[derive(Debug, Clone)]
pub struct ProbeCheckpoint {
    path: PathBuf,
    state: StateDict,
    metadata: BTreeMap<String, serde_json::Value>,
    config_metadata: ConfigMetadata,
    val_results: ValResults,
}

impl ProbeCheckpoint {
    /// Load a checkpoint from disk
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError::NotFound`] if the path does not exist,
    /// [`CheckpointError::Corrupt`] if safetensors parsing fails, and
    /// [`CheckpointError::MissingKey`] / [`CheckpointError::Metadata`] if
    /// required entries are absent or malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CheckpointError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CheckpointError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let data = std::fs::read(path)?;

        let tensors =
            SafeTensors::deserialize(&data).map_err(|e| CheckpointError::Corrupt {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut state = StateDict::new();
        for name in tensors.names() {
            let view = tensors.tensor(name).map_err(|e| CheckpointError::Corrupt {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            if view.dtype() != Dtype::F32 {
                return Err(CheckpointError::Corrupt {
                    path: path.to_path_buf(),
                    message: format!(
                        "tensor '{name}' has dtype {:?}, expected F32",
                        view.dtype()
                    ),
                });
            }
            state.insert(
                name.to_string(),
                TensorData {
                    shape: view.shape().to_vec(),
                    // pod_collect_to_vec tolerates the unaligned offsets a
                    // variable-length safetensors header produces
                    data: bytemuck::pod_collect_to_vec(view.data()),
                },
            );
        }

        if !state.contains_key("weight") {
            return Err(CheckpointError::MissingKey {
                path: path.to_path_buf(),
                key: "weight".to_string(),
            });
        }

        let metadata = parse_metadata(&data, path)?;

        let config_metadata = required_entry::<ConfigMetadata>(&metadata, "config_metadata", path)?;
        let val_results = required_entry::<ValResults>(&metadata, "val_results", path)?;

        Ok(Self {
            path: path.to_path_buf(),
            state,
            metadata,
            config_metadata,
            val_results,
        })
    }

    /// Checkpoint path as given at load time
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, if it is valid UTF-8
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Parameter tensors
    #[must_use]
    pub fn state_dict(&self) -> &StateDict {
        &self.state
    }

    /// All metadata entries (everything except the tensor state)
    #[must_use]
    pub fn metadata_entries(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    /// Parsed `config_metadata` entry
    #[must_use]
    pub fn config_metadata(&self) -> &ConfigMetadata {
        &self.config_metadata
    }

    /// Full backbone model name, e.g. "dinov3_vitb16"
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.config_metadata.model_name
    }

    /// Training/eval image resolution
    #[must_use]
    pub fn image_size(&self) -> u32 {
        self.config_metadata.image_size
    }

    /// Parsed `val_results` entry
    #[must_use]
    pub fn val_results(&self) -> ValResults {
        self.val_results
    }

    /// Probe dimensions inferred from the `weight` tensor shape
    ///
    /// Returns `(out_features, in_features)`: the first dimension is the
    /// output dimension, the second the input dimension.
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError::BadShape`] if `weight` is not exactly
    /// 2-dimensional.
    pub fn weight_dims(&self) -> Result<(usize, usize), CheckpointError> {
        let weight = self.state.get("weight").ok_or_else(|| {
            CheckpointError::MissingKey {
                path: self.path.clone(),
                key: "weight".to_string(),
            }
        })?;
        match weight.shape[..] {
            [out_features, in_features] => Ok((out_features, in_features)),
            _ => Err(CheckpointError::BadShape {
                tensor: "weight".to_string(),
                shape: weight.shape.clone(),
            }),
        }
    }
}

/// Decode the safetensors `__metadata__` map into JSON values
///
/// Values that fail to parse as JSON are carried through as plain strings;
/// only `config_metadata` and `val_results` are required to be objects.
fn parse_metadata(
    data: &[u8],
    path: &Path,
) -> Result<BTreeMap<String, serde_json::Value>, CheckpointError> {
    let (_, header) = SafeTensors::read_metadata(data).map_err(|e| CheckpointError::Corrupt {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut metadata = BTreeMap::new();
    if let Some(entries) = header.metadata().as_ref() {
        for (key, raw) in entries {
            let value = serde_json::from_str(raw)
                .unwrap_or_else(|_| serde_json::Value::String(raw.clone()));
            metadata.insert(key.clone(), value);
        }
    }
    Ok(metadata)
}

/// Extract and deserialize a required metadata entry
fn required_entry<T: serde::de::DeserializeOwned>(
    metadata: &BTreeMap<String, serde_json::Value>,
    key: &str,
    path: &Path,
) -> Result<T, CheckpointError> {
    let value = metadata.get(key).ok_or_else(|| CheckpointError::MissingKey {
        path: path.to_path_buf(),
        key: key.to_string(),
    })?;
    serde_json::from_value(value.clone()).map_err(|e| CheckpointError::Metadata {
        field: key.to_string(),
        message: e.to_string(),
    })
}

/// Serialize a state dict (plus optional string metadata) to safetensors bytes
///
/// Used for the upload payload and for building checkpoint fixtures in
/// tests; the inverse of [`ProbeCheckpoint::load`].
///
/// # Errors
///
/// Returns [`CheckpointError::Serialization`] if the safetensors encoder
/// rejects the tensors.
pub fn to_safetensors(
    state: &StateDict,
    metadata: Option<HashMap<String, String>>,
) -> Result<Vec<u8>, CheckpointError> {
    let buffers: Vec<(String, Vec<u8>)> = state
        .iter()
        .map(|(name, tensor)| (name.clone(), tensor.to_le_bytes()))
        .collect();

    let mut views = Vec::with_capacity(buffers.len());
    for ((name, bytes), tensor) in buffers.iter().zip(state.values()) {
        let view = TensorView::new(Dtype::F32, tensor.shape.clone(), bytes).map_err(|e| {
            CheckpointError::Serialization {
                message: e.to_string(),
            }
        })?;
        views.push((name.clone(), view));
    }

    safetensors::serialize(views, &metadata).map_err(|e| CheckpointError::Serialization {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_state(out_features: usize, in_features: usize) -> StateDict {
        let mut state = StateDict::new();
        state.insert(
            "weight".to_string(),
            TensorData::new(
                vec![out_features, in_features],
                vec![0.5; out_features * in_features],
            ),
        );
        state.insert(
            "bias".to_string(),
            TensorData::new(vec![out_features], vec![0.1; out_features]),
        );
        state
    }

    fn probe_metadata() -> HashMap<String, String> {
        let mut meta = HashMap::new();
        meta.insert(
            "config_metadata".to_string(),
            r#"{"model_name":"dinov3_vitb16","image_size":224}"#.to_string(),
        );
        meta.insert(
            "val_results".to_string(),
            r#"{"top1":0.851,"real_top1":0.892}"#.to_string(),
        );
        meta
    }

    fn write_checkpoint(dir: &std::path::Path, name: &str) -> PathBuf {
        let bytes = to_safetensors(&probe_state(10, 768), Some(probe_metadata())).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_checkpoint(dir.path(), "probe.safetensors");

        let ckpt = ProbeCheckpoint::load(&path).unwrap();
        assert_eq!(ckpt.model_name(), "dinov3_vitb16");
        assert_eq!(ckpt.image_size(), 224);
        assert!((ckpt.val_results().top1 - 0.851).abs() < 1e-9);
        assert!((ckpt.val_results().real_top1 - 0.892).abs() < 1e-9);
        assert_eq!(ckpt.state_dict().len(), 2);
        assert_eq!(ckpt.state_dict()["weight"].shape, vec![10, 768]);
        assert_eq!(ckpt.state_dict()["bias"].numel(), 10);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProbeCheckpoint::load("/tmp/definitely-not-a-checkpoint.safetensors")
            .unwrap_err();
        assert!(matches!(err, CheckpointError::NotFound { .. }));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.safetensors");
        std::fs::write(&path, b"not a safetensors file").unwrap();

        let err = ProbeCheckpoint::load(&path).unwrap_err();
        assert!(matches!(err, CheckpointError::Corrupt { .. }));
    }

    #[test]
    fn test_load_missing_weight_tensor() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = StateDict::new();
        state.insert("bias".to_string(), TensorData::new(vec![4], vec![0.0; 4]));
        let bytes = to_safetensors(&state, Some(probe_metadata())).unwrap();
        let path = dir.path().join("no_weight.safetensors");
        std::fs::write(&path, bytes).unwrap();

        let err = ProbeCheckpoint::load(&path).unwrap_err();
        match err {
            CheckpointError::MissingKey { key, .. } => assert_eq!(key, "weight"),
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_val_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut meta = HashMap::new();
        meta.insert(
            "config_metadata".to_string(),
            r#"{"model_name":"dinov3_vitb16","image_size":224}"#.to_string(),
        );
        let bytes = to_safetensors(&probe_state(4, 8), Some(meta)).unwrap();
        let path = dir.path().join("no_val.safetensors");
        std::fs::write(&path, bytes).unwrap();

        let err = ProbeCheckpoint::load(&path).unwrap_err();
        match err {
            CheckpointError::MissingKey { key, .. } => assert_eq!(key, "val_results"),
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn test_load_malformed_config_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let mut meta = probe_metadata();
        meta.insert(
            "config_metadata".to_string(),
            r#"{"image_size":224}"#.to_string(),
        );
        let bytes = to_safetensors(&probe_state(4, 8), Some(meta)).unwrap();
        let path = dir.path().join("bad_meta.safetensors");
        std::fs::write(&path, bytes).unwrap();

        let err = ProbeCheckpoint::load(&path).unwrap_err();
        match err {
            CheckpointError::Metadata { field, .. } => assert_eq!(field, "config_metadata"),
            other => panic!("expected Metadata, got {other:?}"),
        }
    }

    #[test]
    fn test_weight_dims() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_checkpoint(dir.path(), "probe.safetensors");
        let ckpt = ProbeCheckpoint::load(&path).unwrap();

        let (out_features, in_features) = ckpt.weight_dims().unwrap();
        assert_eq!(out_features, 10);
        assert_eq!(in_features, 768);
    }

    #[test]
    fn test_weight_dims_rejects_wrong_rank() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = StateDict::new();
        state.insert(
            "weight".to_string(),
            TensorData::new(vec![2, 3, 4], vec![0.0; 24]),
        );
        let bytes = to_safetensors(&state, Some(probe_metadata())).unwrap();
        let path = dir.path().join("rank3.safetensors");
        std::fs::write(&path, bytes).unwrap();

        let ckpt = ProbeCheckpoint::load(&path).unwrap();
        let err = ckpt.weight_dims().unwrap_err();
        match err {
            CheckpointError::BadShape { tensor, shape } => {
                assert_eq!(tensor, "weight");
                assert_eq!(shape, vec![2, 3, 4]);
            }
            other => panic!("expected BadShape, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_metadata_carried_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut meta = probe_metadata();
        meta.insert(
            "train_config".to_string(),
            r#"{"epochs":12,"lr":0.003}"#.to_string(),
        );
        meta.insert("note".to_string(), "not json at all".to_string());
        let bytes = to_safetensors(&probe_state(4, 8), Some(meta)).unwrap();
        let path = dir.path().join("extra.safetensors");
        std::fs::write(&path, bytes).unwrap();

        let ckpt = ProbeCheckpoint::load(&path).unwrap();
        assert_eq!(
            ckpt.metadata_entries()["train_config"]["epochs"],
            serde_json::json!(12)
        );
        // Non-JSON values survive as plain strings
        assert_eq!(
            ckpt.metadata_entries()["note"],
            serde_json::json!("not json at all")
        );
    }

    #[test]
    fn test_tensor_data_le_bytes() {
        let t = TensorData::new(vec![2], vec![1.0, -2.0]);
        let bytes = t.to_le_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-2.0f32).to_le_bytes());
    }

    #[test]
    #[should_panic(expected = "data length must match shape")]
    fn test_tensor_data_shape_mismatch_panics() {
        let _ = TensorData::new(vec![3], vec![1.0]);
    }
}
