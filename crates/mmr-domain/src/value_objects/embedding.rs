//! Semantic Embedding Value Objects

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Value Object: Semantic Embedding
///
/// A dense vector produced by an embedding model for one piece of text,
/// one image or one video.
///
/// ## Business Rules
///
/// - Vector must contain at least one element
/// - Within one search index the dimensionality of a modality is fixed
///
/// ## Example
///
/// ```rust
/// use mmr_domain::value_objects::Embedding;
///
/// let embedding = Embedding::new(vec![0.1, 0.2, 0.3], "text-embedding-v4").unwrap();
/// assert_eq!(embedding.dimensions(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The embedding vector values
    pub vector: Vec<f32>,
    /// Name of the model that generated this embedding
    pub model: String,
}

impl Embedding {
    /// Create an embedding, rejecting an empty vector
    pub fn new(vector: Vec<f32>, model: impl Into<String>) -> Result<Self> {
        if vector.is_empty() {
            return Err(Error::validation("embedding vector cannot be empty"));
        }
        Ok(Self {
            vector,
            model: model.into(),
        })
    }

    /// Dimensionality of the embedding vector
    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }

    /// Cosine similarity in `[-1, 1]`
    ///
    /// Returns `None` when dimensions differ or either vector has zero norm.
    pub fn cosine_similarity(&self, other: &Embedding) -> Option<f32> {
        if self.vector.len() != other.vector.len() {
            return None;
        }
        let (mut dot, mut norm_a, mut norm_b) = (0.0_f32, 0.0_f32, 0.0_f32);
        for (a, b) in self.vector.iter().zip(&other.vector) {
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return None;
        }
        Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
    }
}
