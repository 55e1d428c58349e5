//! Character-budget chunking of caption segments.
//!
//! Consecutive transcript segments are concatenated until a character
//! budget is reached; each chunk keeps the start time of its first segment
//! so search results can jump playback to the right moment.

use crate::transcript::TranscriptSegment;

/// A chunk of transcript text ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptChunk {
    /// Concatenated segment text.
    pub text: String,
    /// Start time of the first segment in the chunk (seconds).
    pub start_seconds: f64,
}

/// Configuration for chunking.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Maximum number of characters per chunk.
    pub max_chunk_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 500,
        }
    }
}

/// Split caption segments into chunks bounded by `max_chunk_chars`.
///
/// A segment joins the current chunk while the combined length (plus the
/// joining space) stays within budget; otherwise the chunk is flushed and a
/// new one starts. A single segment longer than the budget becomes its own
/// chunk rather than being split mid-sentence. Empty segments are skipped.
pub fn chunk_transcript(
    segments: &[TranscriptSegment],
    config: &ChunkingConfig,
) -> Vec<TranscriptChunk> {
    let mut chunks = Vec::new();
    let mut current_text = String::new();
    let mut current_start = 0.0;

    for segment in segments {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }

        if current_text.is_empty() {
            current_text.push_str(text);
            current_start = segment.start_seconds;
        } else if current_text.len() + text.len() + 1 <= config.max_chunk_chars {
            current_text.push(' ');
            current_text.push_str(text);
        } else {
            chunks.push(TranscriptChunk {
                text: std::mem::take(&mut current_text),
                start_seconds: current_start,
            });
            current_text.push_str(text);
            current_start = segment.start_seconds;
        }
    }

    if !current_text.is_empty() {
        chunks.push(TranscriptChunk {
            text: current_text,
            start_seconds: current_start,
        });
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start_seconds: start,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_segments_accumulate_until_budget() {
        let segments = vec![
            seg(0.0, "hello there"),
            seg(2.0, "general kenobi"),
            seg(4.0, "you are a bold one"),
        ];

        let config = ChunkingConfig {
            max_chunk_chars: 30,
        };
        let chunks = chunk_transcript(&segments, &config);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "hello there general kenobi");
        assert_eq!(chunks[0].start_seconds, 0.0);
        assert_eq!(chunks[1].text, "you are a bold one");
        assert_eq!(chunks[1].start_seconds, 4.0);
    }

    #[test]
    fn test_chunk_keeps_first_segment_timestamp() {
        let segments = vec![seg(12.5, "a"), seg(15.0, "b"), seg(90.0, "c")];
        let chunks = chunk_transcript(&segments, &ChunkingConfig::default());

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start_seconds, 12.5);
        assert_eq!(chunks[0].text, "a b c");
    }

    #[test]
    fn test_oversized_segment_becomes_its_own_chunk() {
        let long = "x".repeat(100);
        let segments = vec![seg(0.0, "short"), seg(5.0, &long), seg(10.0, "tail")];

        let config = ChunkingConfig {
            max_chunk_chars: 20,
        };
        let chunks = chunk_transcript(&segments, &config);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].text, long);
        assert_eq!(chunks[1].start_seconds, 5.0);
        assert_eq!(chunks[2].text, "tail");
    }

    #[test]
    fn test_empty_and_whitespace_segments_skipped() {
        let segments = vec![seg(0.0, ""), seg(1.0, "   "), seg(2.0, "real text")];
        let chunks = chunk_transcript(&segments, &ChunkingConfig::default());

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "real text");
        assert_eq!(chunks[0].start_seconds, 2.0);
    }

    #[test]
    fn test_empty_transcript_yields_no_chunks() {
        assert!(chunk_transcript(&[], &ChunkingConfig::default()).is_empty());
    }
}
