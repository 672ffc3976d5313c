//! Linear classifier over bag-of-words features.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ModelError;

/// Linear classifier deserialized from a JSON artifact.
///
/// One weight row and one intercept per class; binary models are simply the
/// two-class case. The artifact:
///
/// ```json
/// {
///   "classes": ["negative", "positive"],
///   "weights": [[0.0, 1.2], [1.1, -0.3]],
///   "intercepts": [0.1, -0.1]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    classes: Vec<String>,
    weights: Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

/// Winning class for one input, with its raw decision score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

impl LinearModel {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_slice(bytes)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path)?;
        let model = Self::from_json_slice(&bytes)?;
        info!(
            classes = model.classes.len(),
            features = model.n_features(),
            path = %path.display(),
            "loaded model"
        );
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::NoClasses);
        }
        if self.weights.len() != self.classes.len() {
            return Err(ModelError::WeightShape {
                classes: self.classes.len(),
                rows: self.weights.len(),
            });
        }
        if self.intercepts.len() != self.classes.len() {
            return Err(ModelError::InterceptShape {
                classes: self.classes.len(),
                intercepts: self.intercepts.len(),
            });
        }
        let n = self.n_features();
        if self.weights.iter().any(|row| row.len() != n) {
            return Err(ModelError::RaggedWeights);
        }
        Ok(())
    }

    /// Input feature dimension.
    pub fn n_features(&self) -> usize {
        self.weights.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Score every class as `w·x + b` and return the argmax.
    pub fn predict(&self, features: &[f32]) -> Result<Prediction, ModelError> {
        if features.len() != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                got: features.len(),
            });
        }

        let mut best = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for (i, (row, &intercept)) in self.weights.iter().zip(&self.intercepts).enumerate() {
            let score: f32 = intercept + row.iter().zip(features).map(|(w, x)| w * x).sum::<f32>();
            if score > best_score {
                best = i;
                best_score = score;
            }
        }

        Ok(Prediction {
            label: self.classes[best].clone(),
            score: best_score,
        })
    }
}
