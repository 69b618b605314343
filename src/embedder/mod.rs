// Embedding layer — turns post text into fixed-length dense vectors.
//
// The Embedder trait is the seam between everything that needs vectors
// (ingestion, prediction) and the model that produces them. The default
// implementation runs all-MiniLM-L6-v2 locally via ONNX; tests substitute
// a deterministic fake.

pub mod download;
pub mod onnx;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for converting text into sentence embeddings.
///
/// Implementations must be deterministic for a fixed model artifact: the
/// store holds one embedding per post, and re-embedding the same text has
/// to reproduce it (within float tolerance).
#[async_trait]
pub trait Embedder: Send + Sync {
    /// The fixed output dimensionality. Every stored post's embedding has
    /// exactly this length.
    fn dim(&self) -> usize;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f64>>;

    /// Embed multiple texts, returning vectors in the same order.
    /// Default implementation embeds sequentially — implementations with
    /// real batch support should override.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }
}
