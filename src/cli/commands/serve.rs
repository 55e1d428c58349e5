//! HTTP API server for frontend integration.
//!
//! Mirrors the embedding backend a browser UI talks to: one endpoint for a
//! query embedding, one for a whole video's chunked transcript embeddings,
//! and a server-side search that runs the full pipeline per request.

use crate::chunking::ChunkingConfig;
use crate::cli::Output;
use crate::config::Settings;
use crate::corpus::VideoCorpus;
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::TubeseekError;
use crate::provider::{CorpusProvider, YoutubeCorpusProvider};
use crate::ranking::{self, SearchResult};
use crate::transcript::YoutubeTranscriptSource;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    embedder: Arc<dyn Embedder>,
    provider: Arc<YoutubeCorpusProvider>,
    settings: Settings,
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<&str>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let host = host.unwrap_or(&settings.server.host).to_string();
    let port = port.unwrap_or(settings.server.port);

    let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::with_config(
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

    let state = Arc::new(AppState {
        embedder,
        provider,
        settings,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/query_embedding", get(query_embedding))
        .route("/api/video_embeddings", get(video_embeddings))
        .route("/api/search", post(search))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tubeseek API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Query embedding", "GET  /api/query_embedding?query=...");
    Output::kv("Video embeddings", "GET  /api/video_embeddings?video_id=...");
    Output::kv("Search", "POST /api/search");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct QueryEmbeddingParams {
    query: String,
}

#[derive(Serialize)]
struct QueryEmbeddingResponse {
    query: String,
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct VideoEmbeddingsParams {
    video_id: String,
}

#[derive(Serialize)]
struct VideoEmbeddingsResponse {
    video_id: String,
    title: String,
    chunks: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    start_timestamps: Vec<f64>,
}

#[derive(Deserialize)]
struct SearchRequest {
    /// YouTube URL or video ID.
    video: String,
    query: String,
    #[serde(default)]
    top_k: Option<usize>,
}

#[derive(Serialize)]
struct SearchResponse {
    video_id: String,
    results: Vec<SearchResult>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_status(e: &TubeseekError) -> StatusCode {
    match e {
        TubeseekError::VideoNotFound(_) => StatusCode::NOT_FOUND,
        TubeseekError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(e: TubeseekError) -> axum::response::Response {
    (
        error_status(&e),
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn query_embedding(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryEmbeddingParams>,
) -> impl IntoResponse {
    match state.embedder.embed(&params.query).await {
        Ok(embedding) => Json(QueryEmbeddingResponse {
            query: params.query,
            embedding,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

async fn video_embeddings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoEmbeddingsParams>,
) -> impl IntoResponse {
    let video_id = match state.provider.extract_id(&params.video_id) {
        Some(id) => id,
        None => {
            return error_response(TubeseekError::InvalidInput(format!(
                "Could not parse video URL or ID: {}",
                params.video_id
            )))
        }
    };

    match state.provider.fetch(&video_id).await {
        Ok(payload) => Json(VideoEmbeddingsResponse {
            video_id,
            title: payload.title,
            chunks: payload.texts,
            embeddings: payload.embeddings,
            start_timestamps: payload.start_times,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> impl IntoResponse {
    let top_k = req.top_k.unwrap_or(state.settings.search.top_k);

    let video_id = match state.provider.extract_id(&req.video) {
        Some(id) => id,
        None => {
            return error_response(TubeseekError::InvalidInput(format!(
                "Could not parse video URL or ID: {}",
                req.video
            )))
        }
    };

    let payload = match state.provider.fetch(&video_id).await {
        Ok(payload) => payload,
        Err(e) => return error_response(e),
    };

    let mut corpus = VideoCorpus::new();
    if let Err(e) = corpus.load(payload.texts, payload.start_times, payload.embeddings) {
        return error_response(e);
    }

    let query_embedding = match state.embedder.embed(&req.query).await {
        Ok(embedding) => embedding,
        Err(e) => return error_response(e),
    };

    match ranking::search(&query_embedding, &corpus, top_k) {
        Ok(results) => Json(SearchResponse { video_id, results }).into_response(),
        Err(e) => error_response(e),
    }
}
