//! Interactive session command.
//!
//! Load a video, ask repeated questions, switch videos with `:video`.

use super::build_session;
use crate::cli::{format_timestamp, Output};
use crate::config::Settings;
use crate::session::VideoSession;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive session command.
pub async fn run_session(video: Option<String>, settings: Settings) -> Result<()> {
    let top_k = settings.search.top_k;
    let mut session = build_session(&settings);

    println!("\n{}", style("Tubeseek Session").bold().cyan());
    println!(
        "{}\n",
        style("Type a question, ':video <url>' to load a video, or 'exit' to quit.").dim()
    );

    if let Some(video) = video {
        load(&mut session, &video).await;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("?").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if let Some(video) = input.strip_prefix(":video") {
            let video = video.trim();
            if video.is_empty() {
                Output::warning("Usage: :video <url or id>");
            } else {
                load(&mut session, video).await;
            }
            continue;
        }

        if session.video_id().is_none() {
            Output::warning("No video loaded. Use ':video <url>' first.");
            continue;
        }

        match session.query(input, top_k).await {
            Ok(results) if results.is_empty() => {
                Output::warning("No results found matching your query.");
            }
            Ok(results) => {
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
            }
        }
    }

    Ok(())
}

/// Load a video into the session, reporting progress.
async fn load(session: &mut VideoSession, video: &str) {
    let spinner = Output::spinner("Fetching transcript and embeddings...");
    let outcome = session.load_video(video).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(_) => {
            Output::success(&format!(
                "Loaded '{}' ({} segments)",
                session.video_title().unwrap_or("unknown"),
                session.corpus_size()
            ));
        }
        Err(e) => {
            Output::error(&format!("Failed to load video: {}", e));
        }
    }
}
