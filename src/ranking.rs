//! Top-K ranking of corpus segments against a query embedding.
//!
//! A query is a full scan: every segment is scored with cosine similarity,
//! sorted descending, and the best `top_k` are returned. Corpus sizes are
//! bounded by one video's transcript (low hundreds of segments), so no
//! pruning or approximate indexing is needed.

use crate::corpus::VideoCorpus;
use crate::error::{Result, TubeseekError};
use crate::similarity::cosine_similarity;
use serde::Serialize;

/// One ranked match, recomputed on every query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Matched transcript chunk.
    pub chunk: String,
    /// Playback offset of the chunk in seconds.
    pub timestamp: f64,
    /// Cosine similarity to the query (higher is better).
    pub similarity: f32,
}

/// Rank corpus segments by similarity to `query` and return the top `top_k`.
///
/// An empty corpus or `top_k == 0` yields an empty list, not an error. A
/// query whose dimensionality differs from the corpus embeddings fails with
/// `DimensionMismatch`. Ties resolve to the earlier-occurring segment (the
/// sort is stable), so output order is deterministic.
pub fn search(query: &[f32], corpus: &VideoCorpus, top_k: usize) -> Result<Vec<SearchResult>> {
    if corpus.is_empty() || top_k == 0 {
        return Ok(Vec::new());
    }

    // dimensions() is Some for a non-empty corpus
    let dims = corpus.dimensions().unwrap_or(0);
    if query.len() != dims {
        return Err(TubeseekError::DimensionMismatch {
            expected: dims,
            actual: query.len(),
        });
    }

    let mut scored = Vec::with_capacity(corpus.len());
    for i in 0..corpus.len() {
        let segment = corpus.segment_at(i)?;
        let score = cosine_similarity(query, segment.embedding)?;
        scored.push((i, score));
    }

    // Stable sort: equal scores keep corpus order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k.min(corpus.len()));

    scored
        .into_iter()
        .map(|(i, score)| {
            let segment = corpus.segment_at(i)?;
            Ok(SearchResult {
                chunk: segment.text.to_string(),
                timestamp: segment.start_time,
                similarity: score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(embeddings: Vec<Vec<f32>>) -> VideoCorpus {
        let n = embeddings.len();
        let texts = (0..n).map(|i| format!("segment {}", i)).collect();
        let start_times = (0..n).map(|i| i as f64 * 30.0).collect();

        let mut corpus = VideoCorpus::new();
        corpus.load(texts, start_times, embeddings).unwrap();
        corpus
    }

    #[test]
    fn test_reference_scenario() {
        let mut c = VideoCorpus::new();
        c.load(
            vec!["intro".to_string(), "middle".to_string(), "end".to_string()],
            vec![10.0, 200.0, 3661.0],
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.7, 0.7]],
        )
        .unwrap();

        let results = search(&[1.0, 0.0], &c, 2).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].chunk, "intro");
        assert_eq!(results[0].timestamp, 10.0);
        assert!((results[0].similarity - 1.0).abs() < 1e-6);

        assert_eq!(results[1].chunk, "end");
        assert_eq!(results[1].timestamp, 3661.0);
        assert!((results[1].similarity - 0.707).abs() < 0.001);
    }

    #[test]
    fn test_top_k_larger_than_corpus_returns_all_sorted() {
        let c = corpus(vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.9, 0.1]]);
        let results = search(&[1.0, 0.0], &c, 10).unwrap();

        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_top_k_cutoff_keeps_best_scores() {
        let c = corpus(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.8, 0.2],
            vec![0.5, 0.5],
        ]);
        let all = search(&[1.0, 0.0], &c, 4).unwrap();
        let top = search(&[1.0, 0.0], &c, 2).unwrap();

        assert_eq!(top.len(), 2);
        let worst_returned = top.last().unwrap().similarity;
        for excluded in &all[2..] {
            assert!(worst_returned >= excluded.similarity);
        }
    }

    #[test]
    fn test_idempotence() {
        let c = corpus(vec![vec![0.2, 0.8], vec![0.9, 0.1], vec![0.5, 0.5]]);
        let first = search(&[0.6, 0.4], &c, 3).unwrap();
        let second = search(&[0.6, 0.4], &c, 3).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.chunk, b.chunk);
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(a.similarity, b.similarity);
        }
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        // Identical vectors, so scores are exactly equal and the stable
        // sort must preserve corpus order.
        let c = corpus(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 0.0],
        ]);
        let results = search(&[1.0, 0.0], &c, 4).unwrap();

        assert_eq!(results[0].chunk, "segment 0");
        assert_eq!(results[1].chunk, "segment 2");
        assert_eq!(results[2].chunk, "segment 3");
        assert_eq!(results[3].chunk, "segment 1");
    }

    #[test]
    fn test_empty_corpus_returns_empty() {
        let c = VideoCorpus::new();
        assert!(search(&[1.0, 0.0], &c, 5).unwrap().is_empty());
        assert!(search(&[1.0, 0.0], &c, 0).unwrap().is_empty());
    }

    #[test]
    fn test_top_k_zero_returns_empty() {
        let c = corpus(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert!(search(&[1.0, 0.0], &c, 0).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let c = corpus(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert!(matches!(
            search(&[1.0, 0.0, 0.0], &c, 5),
            Err(TubeseekError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_zero_query_propagates_invalid_vector() {
        let c = corpus(vec![vec![1.0, 0.0]]);
        assert!(matches!(
            search(&[0.0, 0.0], &c, 5),
            Err(TubeseekError::InvalidVector)
        ));
    }
}
