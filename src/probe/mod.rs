//! Linear classification probe
//!
//! A probe is a single linear layer y = W·x + b trained atop frozen DINOv3
//! backbone features: W ∈ ℝ^(out_features × in_features) maps a backbone
//! feature vector to class logits.
//!
//! The numeric side ([`Module`]) and the Hub-serialization side
//! ([`HubPublishable`](crate::hub::HubPublishable)) are separate
//! capabilities composed on the same struct.

use ndarray::{Array1, Array2};
use thiserror::Error;

use crate::checkpoint::{StateDict, TensorData};
use crate::hub::HubPublishable;

/// Errors raised while loading parameters into a probe
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A required parameter is absent from the state dict
    #[error("Missing parameter '{key}' in state dict")]
    MissingKey { key: String },

    /// A parameter's shape disagrees with the probe's declared dimensions
    #[error("Shape mismatch for {tensor}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        tensor: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

/// A module mapping one feature vector to one output vector
pub trait Module {
    /// Forward pass over a single input
    fn forward(&self, input: &Array1<f32>) -> Array1<f32>;
}

/// Linear classification probe: weight `[out_features, in_features]` plus
/// bias `[out_features]`
#[derive(Debug, Clone)]
pub struct LinearProbe {
    weight: Array2<f32>,
    bias: Array1<f32>,
}

impl LinearProbe {
    /// Create a zeroed probe with the given dimensions
    #[must_use]
    pub fn new(in_features: usize, out_features: usize) -> Self {
        Self {
            weight: Array2::zeros((out_features, in_features)),
            bias: Array1::zeros(out_features),
        }
    }

    /// Input (backbone feature) dimension
    #[must_use]
    pub fn in_features(&self) -> usize {
        self.weight.ncols()
    }

    /// Output (class logit) dimension
    #[must_use]
    pub fn out_features(&self) -> usize {
        self.weight.nrows()
    }

    /// Weight matrix
    #[must_use]
    pub fn weight(&self) -> &Array2<f32> {
        &self.weight
    }

    /// Bias vector
    #[must_use]
    pub fn bias(&self) -> &Array1<f32> {
        &self.bias
    }

    /// Load parameters in place from a state dict
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::MissingKey`] if `weight` or `bias` is absent,
    /// [`ProbeError::ShapeMismatch`] if either tensor disagrees with the
    /// probe's declared dimensions.
    pub fn load_state_dict(&mut self, state: &StateDict) -> Result<(), ProbeError> {
        let out_features = self.out_features();
        let in_features = self.in_features();

        let weight = expect_shape(state, "weight", &[out_features, in_features])?;
        let bias = expect_shape(state, "bias", &[out_features])?;

        self.weight = Array2::from_shape_vec((out_features, in_features), weight.data.clone())
            .map_err(|_| ProbeError::ShapeMismatch {
                tensor: "weight".to_string(),
                expected: vec![out_features, in_features],
                actual: weight.shape.clone(),
            })?;
        self.bias = Array1::from_vec(bias.data.clone());

        Ok(())
    }
}

/// Look up a state-dict entry and require an exact shape
fn expect_shape<'a>(
    state: &'a StateDict,
    key: &str,
    expected: &[usize],
) -> Result<&'a TensorData, ProbeError> {
    let tensor = state.get(key).ok_or_else(|| ProbeError::MissingKey {
        key: key.to_string(),
    })?;
    if tensor.shape != expected {
        return Err(ProbeError::ShapeMismatch {
            tensor: key.to_string(),
            expected: expected.to_vec(),
            actual: tensor.shape.clone(),
        });
    }
    Ok(tensor)
}

impl Module for LinearProbe {
    fn forward(&self, input: &Array1<f32>) -> Array1<f32> {
        self.weight.dot(input) + &self.bias
    }
}

impl HubPublishable for LinearProbe {
    fn export_state(&self) -> StateDict {
        let mut state = StateDict::new();
        state.insert(
            "weight".to_string(),
            TensorData::new(
                vec![self.out_features(), self.in_features()],
                self.weight.iter().copied().collect(),
            ),
        );
        state.insert(
            "bias".to_string(),
            TensorData::new(vec![self.out_features()], self.bias.to_vec()),
        );
        state
    }
}
