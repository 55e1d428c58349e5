//! YouTube transcript source.
//!
//! Uses yt-dlp to resolve video metadata and the caption-track table, then
//! downloads the json3 caption track directly.

use super::{TranscriptSegment, TranscriptSource, VideoTranscript};
use crate::error::{Result, TubeseekError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, instrument};

/// YouTube transcript source.
pub struct YoutubeTranscriptSource {
    video_id_regex: Regex,
    http: reqwest::Client,
    /// Preferred caption languages, in order.
    languages: Vec<String>,
}

impl YoutubeTranscriptSource {
    pub fn new(languages: Vec<String>) -> Self {
        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                # Full YouTube URLs
                (?:https?://)?
                (?:www\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        Self {
            video_id_regex,
            http: reqwest::Client::new(),
            languages,
        }
    }

    /// Extract video ID from a YouTube URL or bare ID.
    fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;

        // Try group 1 (URL format) then group 2 (bare ID)
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    /// Fetch metadata and the caption-track table using yt-dlp.
    async fn fetch_metadata_ytdlp(&self, video_id: &str) -> Result<serde_json::Value> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--ignore-errors",
                &url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TubeseekError::ToolNotFound("yt-dlp".to_string())
                } else {
                    TubeseekError::TranscriptSource(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TubeseekError::VideoNotFound(format!(
                "Video {} not found or unavailable: {}",
                video_id, stderr
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json_str).map_err(|e| {
            TubeseekError::TranscriptSource(format!("Failed to parse yt-dlp output: {}", e))
        })
    }

    /// Pick a json3 caption-track URL from yt-dlp metadata.
    ///
    /// Manual subtitles are preferred over automatic captions; within each,
    /// configured languages are tried in order, including region-suffixed
    /// variants like `en-US` and `en-orig`.
    fn select_caption_url(&self, metadata: &serde_json::Value) -> Option<String> {
        for field in ["subtitles", "automatic_captions"] {
            let Some(tracks) = metadata[field].as_object() else {
                continue;
            };

            for lang in &self.languages {
                let entry = tracks.get(lang.as_str()).or_else(|| {
                    tracks
                        .iter()
                        .find(|(key, _)| key.starts_with(&format!("{}-", lang)))
                        .map(|(_, value)| value)
                });

                if let Some(formats) = entry.and_then(|e| e.as_array()) {
                    let url = formats
                        .iter()
                        .find(|f| f["ext"].as_str() == Some("json3"))
                        .and_then(|f| f["url"].as_str());

                    if let Some(url) = url {
                        return Some(url.to_string());
                    }
                }
            }
        }

        None
    }

    /// Download and parse a json3 caption track.
    async fn fetch_caption_track(&self, url: &str) -> Result<Vec<TranscriptSegment>> {
        let track: Json3Track = self.http.get(url).send().await?.json().await?;
        Ok(segments_from_track(track))
    }
}

/// Flatten json3 events into caption segments, dropping styling-only events.
fn segments_from_track(track: Json3Track) -> Vec<TranscriptSegment> {
    track
        .events
        .into_iter()
        .filter_map(|event| {
            let start_seconds = event.t_start_ms? as f64 / 1000.0;
            let text: String = event
                .segs?
                .into_iter()
                .filter_map(|s| s.utf8)
                .collect::<Vec<_>>()
                .join("");
            let text = text.replace('\n', " ").trim().to_string();

            if text.is_empty() {
                None
            } else {
                Some(TranscriptSegment {
                    start_seconds,
                    text,
                })
            }
        })
        .collect()
}

impl Default for YoutubeTranscriptSource {
    fn default() -> Self {
        Self::new(vec!["en".to_string()])
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    fn can_handle(&self, input: &str) -> bool {
        self.extract_video_id(input).is_some()
    }

    fn extract_id(&self, input: &str) -> Option<String> {
        self.extract_video_id(input)
    }

    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<VideoTranscript> {
        let metadata = self.fetch_metadata_ytdlp(video_id).await?;

        let title = metadata["title"]
            .as_str()
            .unwrap_or("Unknown Title")
            .to_string();

        let caption_url = self.select_caption_url(&metadata).ok_or_else(|| {
            TubeseekError::TranscriptSource(format!(
                "No caption track available for video {} in languages {:?}",
                video_id, self.languages
            ))
        })?;

        let segments = self.fetch_caption_track(&caption_url).await?;
        debug!("Fetched {} caption segments for {}", segments.len(), video_id);

        Ok(VideoTranscript {
            video_id: video_id.to_string(),
            title,
            segments,
        })
    }
}

/// json3 caption track as served by YouTube.
#[derive(Debug, Deserialize)]
struct Json3Track {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs")]
    t_start_ms: Option<u64>,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    utf8: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let source = YoutubeTranscriptSource::default();

        // Test various URL formats
        assert_eq!(
            source.extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );

        // Test invalid inputs
        assert_eq!(source.extract_video_id("not-a-video-id"), None);
        assert_eq!(source.extract_video_id(""), None);
    }

    #[test]
    fn test_can_handle() {
        let source = YoutubeTranscriptSource::default();

        assert!(source.can_handle("dQw4w9WgXcQ"));
        assert!(source.can_handle("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(!source.can_handle("/path/to/video.mp4"));
    }

    #[test]
    fn test_select_caption_url_prefers_manual_subtitles() {
        let source = YoutubeTranscriptSource::default();
        let metadata = serde_json::json!({
            "subtitles": {
                "en": [
                    { "ext": "vtt", "url": "https://example.com/manual.vtt" },
                    { "ext": "json3", "url": "https://example.com/manual.json3" }
                ]
            },
            "automatic_captions": {
                "en": [
                    { "ext": "json3", "url": "https://example.com/auto.json3" }
                ]
            }
        });

        assert_eq!(
            source.select_caption_url(&metadata),
            Some("https://example.com/manual.json3".to_string())
        );
    }

    #[test]
    fn test_select_caption_url_falls_back_to_auto_and_variants() {
        let source = YoutubeTranscriptSource::default();
        // No "subtitles" field at all, and only a region-suffixed language.
        let metadata = serde_json::json!({
            "automatic_captions": {
                "en-orig": [
                    { "ext": "json3", "url": "https://example.com/auto.json3" }
                ]
            }
        });

        assert_eq!(
            source.select_caption_url(&metadata),
            Some("https://example.com/auto.json3".to_string())
        );
    }

    #[test]
    fn test_json3_parsing() {
        let raw = serde_json::json!({
            "events": [
                { "tStartMs": 1500, "segs": [ { "utf8": "hello " }, { "utf8": "world" } ] },
                { "tStartMs": 4000 },
                { "tStartMs": 6200, "segs": [ { "utf8": "\n" } ] },
                { "tStartMs": 9000, "segs": [ { "utf8": "next line" } ] }
            ]
        });

        let track: Json3Track = serde_json::from_value(raw).unwrap();
        let segments = segments_from_track(track);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start_seconds, 1.5);
        assert_eq!(segments[0].text, "hello world");
        assert_eq!(segments[1].start_seconds, 9.0);
        assert_eq!(segments[1].text, "next line");
    }
}
