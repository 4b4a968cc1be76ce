//! Similarity sources: where ranked relations come from.

pub mod keyed_vectors;
pub mod neighbors;

pub use keyed_vectors::KeyedVectors;
pub use neighbors::{collect_dataset, ranked_relations, Dataset, Page};

use crate::Result;

/// Anything that can rank words by similarity.
pub trait SimilarityModel {
    /// True if the word has a vector.
    fn contains(&self, word: &str) -> bool;

    /// Up to `topn` most similar words, best first, excluding `word` itself.
    fn most_similar(&self, word: &str, topn: usize) -> Result<Vec<(String, f64)>>;

    /// Similarity between two known words.
    fn similarity(&self, a: &str, b: &str) -> Result<f64>;
}
