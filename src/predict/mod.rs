// Pairwise authorship prediction — per-request logistic regression over
// stored post embeddings.

pub mod logistic;
pub mod pairwise;

pub use pairwise::{predict_author, Prediction};
