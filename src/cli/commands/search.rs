//! One-shot search command: load a video, run a single query.

use super::build_session;
use crate::cli::{format_timestamp, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    video: &str,
    query: &str,
    top_k: Option<usize>,
    settings: Settings,
) -> Result<()> {
    let top_k = top_k.unwrap_or(settings.search.top_k);
    let mut session = build_session(&settings);

    let spinner = Output::spinner("Fetching transcript and embeddings...");
    let load = session.load_video(video).await;
    spinner.finish_and_clear();

    if let Err(e) = load {
        Output::error(&format!("Failed to load video: {}", e));
        return Err(anyhow::anyhow!("{}", e));
    }

    Output::success(&format!(
        "Loaded '{}' ({} segments)",
        session.video_title().unwrap_or("unknown"),
        session.corpus_size()
    ));

    let spinner = Output::spinner("Searching...");
    let outcome = session.query(query, top_k).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(results) if results.is_empty() => {
            Output::warning("No results found matching your query.");
        }
        Ok(results) => {
            Output::success(&format!("Found {} results", results.len()));
            for result in &results {
                Output::search_result(
                    &format_timestamp(result.timestamp),
                    result.similarity,
                    &result.chunk,
                    session.watch_url(result).as_deref(),
                );
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(anyhow::anyhow!("{}", e));
        }
    }

    Ok(())
}
