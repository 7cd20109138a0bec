//! Run one TMDB movie search and print the mapped top results.
//! Usage:
//!   cargo run --bin search_probe -- "<keyword>"
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::{Context, Result};
use cinequery::models;
use cinequery::tmdb::{self, TmdbApi, TmdbClient};
use dotenvy::dotenv;
use reqwest::StatusCode;
use serde_json::Value;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let keyword = env::args()
        .nth(1)
        .context("usage: cargo run --bin search_probe -- \"<keyword>\"")?;

    let api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
    if !tmdb::api_key_is_configured(&api_key) {
        anyhow::bail!("TMDB_API_KEY is still the placeholder value");
    }

    let client = TmdbClient::new(api_key);
    let reply = client.search_movies(&keyword).await?;
    if reply.status != StatusCode::OK {
        anyhow::bail!("TMDB answered {}: {}", reply.status, reply.body);
    }

    let body: Value = serde_json::from_str(&reply.body).context("JSON parse failed")?;
    let movies = models::top_movies(&body, 3);
    println!("{}", serde_json::to_string_pretty(&movies)?);
    Ok(())
}
