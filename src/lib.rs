// Graphite: authorship attribution and topic modeling over social timelines.
//
// This is the library root. Each module corresponds to a major subsystem:
// ingest posts, store them with embeddings, and run the two analyses
// (pairwise author prediction and topic extraction) on demand.

pub mod config;
pub mod db;
pub mod embedder;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod predict;
pub mod social;
pub mod status;
pub mod topics;
