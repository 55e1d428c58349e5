//! Session-scoped corpus of transcript segments for one video.
//!
//! The corpus holds three parallel sequences (texts, start times,
//! embeddings) of equal length; position `i` across all three refers to the
//! same segment. It is replaced wholesale on video change, never mutated
//! incrementally.

use crate::error::{Result, TubeseekError};

/// Positional read view of one segment in a corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    /// Transcript chunk content.
    pub text: &'a str,
    /// Playback offset in seconds where the chunk begins.
    pub start_time: f64,
    /// Embedding vector for the chunk.
    pub embedding: &'a [f32],
}

/// The full set of segments for the currently loaded video.
#[derive(Debug, Default)]
pub struct VideoCorpus {
    texts: Vec<String>,
    start_times: Vec<f64>,
    embeddings: Vec<Vec<f32>>,
}

impl VideoCorpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire stored corpus.
    ///
    /// Validates before mutating, so a failed load leaves the previous
    /// corpus intact and a partial update is never observable. Fails with
    /// `ShapeMismatch` when the three sequences have different lengths and
    /// with `DimensionMismatch` when the embedding rows are ragged.
    pub fn load(
        &mut self,
        texts: Vec<String>,
        start_times: Vec<f64>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<()> {
        if texts.len() != start_times.len() || texts.len() != embeddings.len() {
            return Err(TubeseekError::ShapeMismatch {
                texts: texts.len(),
                timestamps: start_times.len(),
                embeddings: embeddings.len(),
            });
        }

        if let Some(first) = embeddings.first() {
            let dims = first.len();
            for row in &embeddings {
                if row.len() != dims {
                    return Err(TubeseekError::DimensionMismatch {
                        expected: dims,
                        actual: row.len(),
                    });
                }
            }
        }

        self.texts = texts;
        self.start_times = start_times;
        self.embeddings = embeddings;
        Ok(())
    }

    /// Number of segments in the corpus.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Embedding dimensionality, or `None` for an empty corpus.
    pub fn dimensions(&self) -> Option<usize> {
        self.embeddings.first().map(|e| e.len())
    }

    /// Read the segment at position `i`.
    pub fn segment_at(&self, i: usize) -> Result<Segment<'_>> {
        if i >= self.len() {
            return Err(TubeseekError::IndexOutOfRange {
                index: i,
                len: self.len(),
            });
        }

        Ok(Segment {
            text: &self.texts[i],
            start_time: self.start_times[i],
            embedding: &self.embeddings[i],
        })
    }

    /// Reset to the empty corpus.
    ///
    /// Called when a video change begins, before the new fetch completes,
    /// so segments from the previous video are never visible during a
    /// pending load.
    pub fn clear(&mut self) {
        self.texts.clear();
        self.start_times.clear();
        self.embeddings.clear();
    }
}
