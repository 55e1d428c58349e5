//! Corpus providers: turn a video ID into texts, timestamps, and embeddings.

use crate::chunking::{chunk_transcript, ChunkingConfig};
use crate::embedding::Embedder;
use crate::error::{Result, TubeseekError};
use crate::transcript::{TranscriptSource, YoutubeTranscriptSource};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Everything needed to load one video's corpus: three parallel sequences
/// of equal length.
#[derive(Debug, Clone)]
pub struct CorpusPayload {
    /// Video title, for display.
    pub title: String,
    /// Transcript chunks.
    pub texts: Vec<String>,
    /// Start timestamps in seconds, one per chunk.
    pub start_times: Vec<f64>,
    /// Embedding vectors, one per chunk.
    pub embeddings: Vec<Vec<f32>>,
}

/// Trait for corpus providers.
#[async_trait]
pub trait CorpusProvider: Send + Sync {
    /// Extract the canonical video ID from a URL or bare ID.
    ///
    /// The default accepts any non-empty input verbatim; sources with a
    /// recognizable URL scheme should override this.
    fn extract_id(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Fetch and embed the transcript for a video ID.
    async fn fetch(&self, video_id: &str) -> Result<CorpusPayload>;
}

/// Corpus provider backed by YouTube captions and an embedding service.
pub struct YoutubeCorpusProvider {
    source: YoutubeTranscriptSource,
    chunking: ChunkingConfig,
    embedder: Arc<dyn Embedder>,
}

impl YoutubeCorpusProvider {
    pub fn new(
        source: YoutubeTranscriptSource,
        chunking: ChunkingConfig,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            source,
            chunking,
            embedder,
        }
    }
}

#[async_trait]
impl CorpusProvider for YoutubeCorpusProvider {
    fn extract_id(&self, input: &str) -> Option<String> {
        self.source.extract_id(input)
    }

    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<CorpusPayload> {
        let transcript = self.source.fetch(video_id).await?;
        info!(
            "Fetched transcript for '{}' ({} segments)",
            transcript.title,
            transcript.segments.len()
        );

        let chunks = chunk_transcript(&transcript.segments, &self.chunking);

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let start_times: Vec<f64> = chunks.iter().map(|c| c.start_seconds).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != texts.len() {
            return Err(TubeseekError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        Ok(CorpusPayload {
            title: transcript.title,
            texts,
            start_times,
            embeddings,
        })
    }
}
