use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("feature vector has {got} entries, model expects {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("model defines no classes")]
    NoClasses,

    #[error("{classes} classes but {rows} weight rows")]
    WeightShape { classes: usize, rows: usize },

    #[error("{classes} classes but {intercepts} intercepts")]
    InterceptShape { classes: usize, intercepts: usize },

    #[error("weight rows have inconsistent lengths")]
    RaggedWeights,

    #[error("vocabulary index {index} out of range for {size} tokens")]
    VocabularyIndex { index: usize, size: usize },

    #[error("duplicate vocabulary index {index}")]
    DuplicateVocabularyIndex { index: usize },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
