//! Tubeseek - Semantic Search over Video Transcripts
//!
//! Paste a video link, get its transcript broken into timed chunks with
//! vector embeddings, and ask natural-language questions answered by the
//! most semantically similar moments, each with a timestamp to jump
//! playback there.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `transcript` - Caption-track acquisition (YouTube)
//! - `chunking` - Character-budget chunking of caption segments
//! - `embedding` - Embedding generation
//! - `similarity` - Cosine similarity
//! - `corpus` - Session-scoped corpus for one video
//! - `ranking` - Top-K ranking with stable tie-breaking
//! - `provider` - Corpus providers (transcript + chunking + embeddings)
//! - `session` - Session controller: corpus lifecycle and queries
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tubeseek::chunking::ChunkingConfig;
//! use tubeseek::embedding::OpenAIEmbedder;
//! use tubeseek::provider::YoutubeCorpusProvider;
//! use tubeseek::session::VideoSession;
//! use tubeseek::transcript::YoutubeTranscriptSource;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let embedder = Arc::new(OpenAIEmbedder::new());
//!     let provider = Arc::new(YoutubeCorpusProvider::new(
//!         YoutubeTranscriptSource::default(),
//!         ChunkingConfig::default(),
//!         embedder.clone(),
//!     ));
//!
//!     let mut session = VideoSession::new(embedder, provider);
//!     session.load_video("https://youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!
//!     for result in session.query("what is the chorus about", 5).await? {
//!         println!("{:>8.1}s  {:.3}  {}", result.timestamp, result.similarity, result.chunk);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod provider;
pub mod ranking;
pub mod session;
pub mod similarity;
pub mod transcript;

pub use error::{Result, TubeseekError};
