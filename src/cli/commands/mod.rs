//! Command implementations.

mod config;
mod search;
mod serve;
mod session;

pub use config::run_config;
pub use search::run_search;
pub use serve::run_serve;
pub use session::run_session;

use crate::chunking::ChunkingConfig;
use crate::config::Settings;
use crate::embedding::OpenAIEmbedder;
use crate::provider::YoutubeCorpusProvider;
use crate::session::VideoSession;
use crate::transcript::YoutubeTranscriptSource;
use std::sync::Arc;

/// Wire up a session from settings.
fn build_session(settings: &Settings) -> VideoSession {
    let embedder = Arc::new(OpenAIEmbedder::with_config(
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
    ));

    let provider = Arc::new(YoutubeCorpusProvider::new(
        YoutubeTranscriptSource::new(settings.transcript.languages.clone()),
        ChunkingConfig {
            max_chunk_chars: settings.chunking.max_chunk_chars,
        },
        embedder.clone(),
    ));

    VideoSession::new(embedder, provider)
}
