//! Transcript acquisition from video caption tracks.

mod youtube;

pub use youtube::YoutubeTranscriptSource;

use crate::error::Result;
use async_trait::async_trait;

/// One caption line with its playback offset.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Caption text.
    pub text: String,
}

/// A fetched transcript for one video.
#[derive(Debug, Clone)]
pub struct VideoTranscript {
    /// Video ID the transcript belongs to.
    pub video_id: String,
    /// Video title.
    pub title: String,
    /// Caption segments in playback order.
    pub segments: Vec<TranscriptSegment>,
}

/// Trait for transcript sources.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Whether this source can handle the given URL or ID.
    fn can_handle(&self, input: &str) -> bool;

    /// Extract the canonical video ID from a URL or bare ID.
    fn extract_id(&self, input: &str) -> Option<String>;

    /// Fetch the transcript for a video ID.
    async fn fetch(&self, video_id: &str) -> Result<VideoTranscript>;
}
