//! Session controller: corpus lifecycle and query orchestration.
//!
//! A `VideoSession` owns the corpus and result list for the currently
//! loaded video. Loads are keyed by a generation counter so that when two
//! loads overlap, only the last-initiated one may populate the corpus; a
//! late response for an abandoned video is discarded.

use crate::corpus::VideoCorpus;
use crate::embedding::Embedder;
use crate::error::{Result, TubeseekError};
use crate::provider::{CorpusPayload, CorpusProvider};
use crate::ranking::{self, SearchResult};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ticket for one corpus load, handed back to `apply_load`/`fail_load`.
#[derive(Debug, Clone)]
pub struct LoadToken {
    /// Canonical video ID being loaded.
    pub video_id: String,
    generation: u64,
}

/// What became of a completed load.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The corpus was replaced with this load's payload.
    Applied,
    /// A newer load was initiated in the meantime; the payload was discarded.
    Superseded,
}

/// Session state for one video at a time.
pub struct VideoSession {
    embedder: Arc<dyn Embedder>,
    provider: Arc<dyn CorpusProvider>,
    video_id: Option<String>,
    video_title: Option<String>,
    corpus: VideoCorpus,
    results: Vec<SearchResult>,
    generation: u64,
    loading: bool,
}

impl VideoSession {
    pub fn new(embedder: Arc<dyn Embedder>, provider: Arc<dyn CorpusProvider>) -> Self {
        Self {
            embedder,
            provider,
            video_id: None,
            video_title: None,
            corpus: VideoCorpus::new(),
            results: Vec::new(),
            generation: 0,
            loading: false,
        }
    }

    /// Begin loading a new video.
    ///
    /// Clears the corpus and any prior results immediately, so stale
    /// segments from the previous video are never visible while the fetch
    /// is pending, and invalidates any in-flight load by bumping the
    /// generation.
    pub fn begin_load(&mut self, video_id: &str) -> LoadToken {
        self.generation += 1;
        self.loading = true;
        self.video_id = Some(video_id.to_string());
        self.video_title = None;
        self.corpus.clear();
        self.results.clear();

        debug!("Load {} started for video {}", self.generation, video_id);
        LoadToken {
            video_id: video_id.to_string(),
            generation: self.generation,
        }
    }

    /// Apply a completed load if it is still the most recent one.
    pub fn apply_load(&mut self, token: &LoadToken, payload: CorpusPayload) -> Result<LoadOutcome> {
        if token.generation != self.generation {
            warn!(
                "Discarding stale load for video {} (generation {} superseded by {})",
                token.video_id, token.generation, self.generation
            );
            return Ok(LoadOutcome::Superseded);
        }

        self.corpus
            .load(payload.texts, payload.start_times, payload.embeddings)?;
        self.video_title = Some(payload.title);
        self.loading = false;

        info!(
            "Loaded corpus for video {} ({} segments)",
            token.video_id,
            self.corpus.len()
        );
        Ok(LoadOutcome::Applied)
    }

    /// Record a failed load.
    ///
    /// The corpus stays empty and prior results stay cleared; a loading
    /// failure is surfaced to the caller rather than silently showing the
    /// previous video's data.
    pub fn fail_load(&mut self, token: &LoadToken) {
        if token.generation == self.generation {
            self.loading = false;
        }
    }

    /// Load a video end to end: parse the input, fetch the corpus, apply it.
    pub async fn load_video(&mut self, input: &str) -> Result<LoadOutcome> {
        let video_id = self.provider.extract_id(input).ok_or_else(|| {
            TubeseekError::InvalidInput(format!("Could not parse video URL or ID: {}", input))
        })?;
        let token = self.begin_load(&video_id);

        match self.provider.fetch(&video_id).await {
            Ok(payload) => self.apply_load(&token, payload),
            Err(e) => {
                self.fail_load(&token);
                Err(e)
            }
        }
    }

    /// Run a query against the loaded corpus.
    ///
    /// Returns a fresh, independent result list and replaces the stored one
    /// wholesale. Rejected while a load is pending. An embedding or ranking
    /// failure leaves the previously stored results untouched.
    pub async fn query(&mut self, text: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if self.loading {
            return Err(TubeseekError::CorpusLoading);
        }

        let query_embedding = self.embedder.embed(text).await?;
        let results = ranking::search(&query_embedding, &self.corpus, top_k)?;

        self.results = results.clone();
        Ok(results)
    }

    /// The most recent query's results.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Currently loaded video ID, if any.
    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// Title of the currently loaded video, if known.
    pub fn video_title(&self) -> Option<&str> {
        self.video_title.as_deref()
    }

    /// Number of segments in the current corpus.
    pub fn corpus_size(&self) -> usize {
        self.corpus.len()
    }

    /// Whether a corpus load is pending.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Build a watch URL that seeks playback to a result's timestamp.
    pub fn watch_url(&self, result: &SearchResult) -> Option<String> {
        self.video_id.as_ref().map(|id| {
            format!(
                "https://youtube.com/watch?v={}&t={}s",
                id, result.timestamp as u64
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Embedder that maps known phrases to fixed vectors.
    struct StaticEmbedder {
        dims: usize,
    }

    #[async_trait]
    impl Embedder for StaticEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            match text {
                "first" => Ok(vec![1.0, 0.0]),
                "second" => Ok(vec![0.0, 1.0]),
                "broken" => Err(TubeseekError::Embedding("boom".to_string())),
                _ => Ok(vec![0.7, 0.7]),
            }
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut out = Vec::new();
            for t in texts {
                out.push(self.embed(t).await?);
            }
            Ok(out)
        }

        fn dimensions(&self) -> usize {
            self.dims
        }
    }

    /// Provider serving a fixed three-segment corpus for any video.
    struct StaticProvider;

    #[async_trait]
    impl CorpusProvider for StaticProvider {
        async fn fetch(&self, video_id: &str) -> Result<CorpusPayload> {
            if video_id == "missing" {
                return Err(TubeseekError::VideoNotFound(video_id.to_string()));
            }
            Ok(CorpusPayload {
                title: format!("Video {}", video_id),
                texts: vec!["intro".to_string(), "middle".to_string(), "end".to_string()],
                start_times: vec![10.0, 200.0, 3661.0],
                embeddings: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.7, 0.7]],
            })
        }
    }

    fn session() -> VideoSession {
        VideoSession::new(
            Arc::new(StaticEmbedder { dims: 2 }),
            Arc::new(StaticProvider),
        )
    }

    #[tokio::test]
    async fn test_load_then_query() {
        let mut session = session();

        let outcome = session.load_video("abc123def45").await.unwrap();
        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(session.corpus_size(), 3);
        assert_eq!(session.video_title(), Some("Video abc123def45"));

        let results = session.query("first", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk, "intro");
        assert_eq!(results[0].timestamp, 10.0);
        assert_eq!(results[1].chunk, "end");
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let mut session = session();

        // First load starts, then a second video is pasted before it
        // resolves.
        let old_token = session.begin_load("old00000000");
        let new_token = session.begin_load("new00000000");

        let old_payload = StaticProvider.fetch("old00000000").await.unwrap();
        let outcome = session.apply_load(&old_token, old_payload).unwrap();
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert_eq!(session.corpus_size(), 0);
        assert!(session.is_loading());

        let new_payload = StaticProvider.fetch("new00000000").await.unwrap();
        let outcome = session.apply_load(&new_token, new_payload).unwrap();
        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(session.video_id(), Some("new00000000"));
        assert_eq!(session.corpus_size(), 3);
    }

    #[tokio::test]
    async fn test_query_rejected_while_loading() {
        let mut session = session();
        session.begin_load("abc123def45");

        assert!(matches!(
            session.query("first", 5).await,
            Err(TubeseekError::CorpusLoading)
        ));
    }

    #[tokio::test]
    async fn test_failed_load_clears_previous_results() {
        let mut session = session();

        session.load_video("abc123def45").await.unwrap();
        session.query("first", 5).await.unwrap();
        assert!(!session.results().is_empty());

        let err = session.load_video("missing").await.unwrap_err();
        assert!(matches!(err, TubeseekError::VideoNotFound(_)));

        // No stale data from the previous video survives the failed load.
        assert_eq!(session.corpus_size(), 0);
        assert!(session.results().is_empty());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_embedding_failure_leaves_prior_results() {
        let mut session = session();

        session.load_video("abc123def45").await.unwrap();
        session.query("first", 1).await.unwrap();
        assert_eq!(session.results().len(), 1);

        assert!(session.query("broken", 5).await.is_err());
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].chunk, "intro");
    }

    #[tokio::test]
    async fn test_query_on_empty_session_returns_no_results() {
        let mut session = session();
        let results = session.query("first", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_watch_url_seeks_to_timestamp() {
        let mut session = session();
        session.load_video("abc123def45").await.unwrap();
        session.query("second", 1).await.unwrap();

        let result = &session.results()[0];
        assert_eq!(
            session.watch_url(result).unwrap(),
            "https://youtube.com/watch?v=abc123def45&t=200s"
        );
    }
}
