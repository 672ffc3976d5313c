//! Inference layer: bag-of-words vectorizer, linear classifier, and the
//! normalize → vectorize → predict pipeline.

mod error;
pub mod model;
pub mod pipeline;
pub mod vectorizer;

pub use error::ModelError;
pub use model::{LinearModel, Prediction};
pub use pipeline::Pipeline;
pub use vectorizer::Vectorizer;
