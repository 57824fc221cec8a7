use crate::error::Result;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Text-to-vector capability.
///
/// The production embedding model is an external service; the retrieval core
/// only depends on this trait. Implementations must be deterministic for the
/// same input so retrieval stays reproducible against a fixed corpus.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts; the default just loops
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Output vector dimension
    fn dimension(&self) -> usize;
}

/// Deterministic bag-of-tokens hashing embedder.
///
/// Tokens are lowercased alphanumeric runs hashed into a fixed number of
/// buckets, then L2-normalized. Not a semantic model: shared vocabulary is
/// the only similarity signal. Good enough to exercise ranked retrieval in
/// tests and the CLI without a model download.
pub struct TokenHashEmbedder {
    dimension: usize,
}

impl TokenHashEmbedder {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }
}

impl Default for TokenHashEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl Embedder for TokenHashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_ascii_lowercase();
            vector[self.bucket(&token)] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedding_is_deterministic_and_normalized() {
        let embedder = TokenHashEmbedder::default();
        let a = embedder.embed("def health(): return ok").await.unwrap();
        let b = embedder.embed("def health(): return ok").await.unwrap();
        assert_eq!(a, b);

        let norm = a.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn shared_vocabulary_scores_higher() {
        let embedder = TokenHashEmbedder::default();
        let query = embedder.embed("health check endpoint").await.unwrap();
        let close = embedder.embed("def health_check(): ...").await.unwrap();
        let far = embedder.embed("fn parse_config(path)").await.unwrap();

        let dot = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() };
        assert!(dot(&query, &close) > dot(&query, &far));
    }

    #[tokio::test]
    async fn empty_text_embeds_to_zero_vector() {
        let embedder = TokenHashEmbedder::new(32);
        let v = embedder.embed("").await.unwrap();
        assert_eq!(v.len(), 32);
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
