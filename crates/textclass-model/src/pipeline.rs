//! End-to-end prediction: normalize → vectorize → predict.

use textclass_core::Normalizer;
use tracing::{debug, info};

use crate::error::ModelError;
use crate::model::{LinearModel, Prediction};
use crate::vectorizer::Vectorizer;

/// Read-only prediction pipeline shared across requests.
///
/// All three stages are immutable after construction, so the pipeline is
/// `Send + Sync` and lives behind an `Arc` for the server's lifetime.
#[derive(Debug)]
pub struct Pipeline {
    normalizer: Normalizer,
    vectorizer: Vectorizer,
    model: LinearModel,
}

impl Pipeline {
    /// Wire the stages together, checking that the vectorizer's feature
    /// dimension matches the model's inputs.
    pub fn new(
        normalizer: Normalizer,
        vectorizer: Vectorizer,
        model: LinearModel,
    ) -> Result<Self, ModelError> {
        if vectorizer.dim() != model.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: model.n_features(),
                got: vectorizer.dim(),
            });
        }
        info!(
            features = vectorizer.dim(),
            classes = model.classes().len(),
            "pipeline ready"
        );
        Ok(Self {
            normalizer,
            vectorizer,
            model,
        })
    }

    /// Classify raw user text.
    pub fn predict(&self, raw: &str) -> Result<Prediction, ModelError> {
        let cleaned = self.normalizer.normalize(raw);
        debug!(cleaned = %cleaned, "normalized input");
        let features = self.vectorizer.transform(&cleaned);
        self.model.predict(&features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentiment_pipeline() -> Pipeline {
        let vectorizer = Vectorizer::from_json_slice(
            br#"{ "vocabulary": { "good": 0, "bad": 1 } }"#,
        )
        .unwrap();
        let model = LinearModel::from_json_slice(
            br#"{
                "classes": ["negative", "positive"],
                "weights": [[0.0, 1.0], [1.0, 0.0]],
                "intercepts": [0.0, 0.0]
            }"#,
        )
        .unwrap();
        Pipeline::new(Normalizer::new().unwrap(), vectorizer, model).unwrap()
    }

    #[test]
    fn classifies_raw_text() {
        let pipeline = sentiment_pipeline();

        let p = pipeline.predict("This movie was really GOOD!!!").unwrap();
        assert_eq!(p.label, "positive");

        let p = pipeline.predict("so bad, just bad").unwrap();
        assert_eq!(p.label, "negative");
        assert_eq!(p.score, 2.0);
    }

    #[test]
    fn empty_text_still_classifies() {
        // Zero feature vector scores intercepts only; first class wins the tie.
        let p = sentiment_pipeline().predict("").unwrap();
        assert_eq!(p.label, "negative");
        assert_eq!(p.score, 0.0);
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let vectorizer =
            Vectorizer::from_json_slice(br#"{ "vocabulary": { "good": 0 } }"#).unwrap();
        let model = LinearModel::from_json_slice(
            br#"{
                "classes": ["a", "b"],
                "weights": [[0.0, 1.0], [1.0, 0.0]],
                "intercepts": [0.0, 0.0]
            }"#,
        )
        .unwrap();
        let err = Pipeline::new(Normalizer::new().unwrap(), vectorizer, model).unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn pipeline_is_debuggable() {
        let rendered = format!("{:?}", sentiment_pipeline());
        assert!(rendered.contains("Pipeline"));
    }
}
