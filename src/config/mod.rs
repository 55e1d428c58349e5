//! Configuration management for Tubeseek.

mod settings;

pub use settings::{
    ChunkingSettings, EmbeddingSettings, GeneralSettings, SearchSettings, ServerSettings, Settings,
    TranscriptSettings,
};
