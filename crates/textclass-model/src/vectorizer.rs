//! Bag-of-words feature extraction over a fixed vocabulary.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ModelError;

/// Bag-of-words vectorizer deserialized from a JSON artifact.
///
/// The artifact maps each vocabulary token to its feature column:
///
/// ```json
/// { "vocabulary": { "good": 0, "bad": 1 }, "binary": false }
/// ```
///
/// Columns must cover `0..len` exactly; `binary: true` clamps counts to
/// presence (0/1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vectorizer {
    vocabulary: HashMap<String, usize>,
    #[serde(default)]
    binary: bool,
}

impl Vectorizer {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let vectorizer: Self = serde_json::from_slice(bytes)?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path)?;
        let vectorizer = Self::from_json_slice(&bytes)?;
        info!(tokens = vectorizer.dim(), path = %path.display(), "loaded vectorizer");
        Ok(vectorizer)
    }

    /// Every column in `0..len` must be claimed by exactly one token.
    fn validate(&self) -> Result<(), ModelError> {
        let size = self.vocabulary.len();
        let mut seen = vec![false; size];
        for &index in self.vocabulary.values() {
            if index >= size {
                return Err(ModelError::VocabularyIndex { index, size });
            }
            if seen[index] {
                return Err(ModelError::DuplicateVocabularyIndex { index });
            }
            seen[index] = true;
        }
        Ok(())
    }

    /// Feature dimension (vocabulary size).
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Count vocabulary tokens in whitespace-separated, already-normalized
    /// text. Unknown tokens are ignored.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut features = vec![0.0f32; self.dim()];
        for token in text.split_whitespace() {
            if let Some(&index) = self.vocabulary.get(token) {
                if self.binary {
                    features[index] = 1.0;
                } else {
                    features[index] += 1.0;
                }
            }
        }
        features
    }
}
