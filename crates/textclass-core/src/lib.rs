pub mod normalize;
pub mod stem;
mod stopwords;

pub use normalize::Normalizer;
pub use stem::stem;
