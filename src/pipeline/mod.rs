// Pipelines — multi-step operations that tie the API, embedder, and store
// together.

pub mod sync;
