use crate::models::{self, MovieRecord};
use crate::tmdb::{self, TmdbApi, TmdbClient};
use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

const TOP_RESULTS: usize = 3;

#[derive(Clone)]
pub struct AppState {
    pub tmdb: Arc<dyn TmdbApi>,
    pub api_key: String,
}

pub async fn run_server() -> Result<()> {
    // Read once at startup; an unset key behaves exactly like the template
    // value so every search answers 500 until it is configured.
    let api_key = env::var("TMDB_API_KEY")
        .unwrap_or_else(|_| tmdb::API_KEY_PLACEHOLDER.to_string());
    if !tmdb::api_key_is_configured(&api_key) {
        warn!("TMDB_API_KEY is missing or still the placeholder; search requests will be rejected");
    }

    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::new(api_key.clone()));
    let state = AppState { tmdb, api_key };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/movies/search/:kw", get(handle_search))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn handle_search(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Response {
    if keyword.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Search keyword cannot be empty."})),
        )
            .into_response();
    }

    if !tmdb::api_key_is_configured(&state.api_key) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "API Key not configured."})),
        )
            .into_response();
    }

    let reply = match state.tmdb.search_movies(&keyword).await {
        Ok(reply) => reply,
        Err(err) => {
            error!("TMDB search for '{}' failed: {:?}", keyword, err);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "Failed to contact movie service."})),
            )
                .into_response();
        }
    };

    // TMDB errors (invalid key, unknown path, rate limit) go back to the
    // caller exactly as received.
    if reply.status != StatusCode::OK {
        warn!(
            "TMDB search for '{}' returned status {}",
            keyword, reply.status
        );
        return (reply.status, reply.body).into_response();
    }

    let body: Value = match serde_json::from_str(&reply.body) {
        Ok(body) => body,
        Err(err) => {
            error!("TMDB search for '{}' returned unparseable JSON: {}", keyword, err);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "Failed to contact movie service."})),
            )
                .into_response();
        }
    };

    let movies = models::top_movies(&body, TOP_RESULTS);
    info!(
        "Top {} movies for '{}': {}",
        movies.len(),
        keyword,
        summarize(&movies)
    );

    match serde_json::to_string_pretty(&movies) {
        Ok(encoded) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            encoded,
        )
            .into_response(),
        Err(err) => {
            error!("Failed to encode search response: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn summarize(movies: &[MovieRecord]) -> String {
    movies
        .iter()
        .map(|m| format!("'{}' ({})", m.title, m.id))
        .collect::<Vec<_>>()
        .join(", ")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
