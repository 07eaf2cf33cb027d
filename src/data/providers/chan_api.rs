//! Provider for 4chan-compatible read-only JSON APIs.
//!
//! Endpoints (relative to the base URL):
//! - `/boards.json`: `{"boards": [{"board": "g", ...}]}`
//! - `/{board}/catalog.json`: pages of thread summaries
//! - `/{board}/thread/{no}.json`: `{"posts": [...]}`, oldest first

use async_trait::async_trait;
use chrono::DateTime;
use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::data::markup;
use crate::data::{CatalogEntry, DataProvider, Post, ProviderError};

pub const DEFAULT_API_BASE_URL: &str = "https://a.4cdn.org";

/// Catalog titles built from a comment teaser are cut to this many characters.
const TEASER_CHARS: usize = 80;

// ============================================================================
// API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct BoardList {
    boards: Vec<BoardRecord>,
}

#[derive(Deserialize, Debug)]
struct BoardRecord {
    board: String,
}

#[derive(Deserialize, Debug)]
struct CatalogPage {
    #[serde(default)]
    threads: Vec<ApiPost>,
}

#[derive(Deserialize, Debug)]
struct ThreadResponse {
    posts: Vec<ApiPost>,
}

/// A post as the API reports it. Catalog threads are the same shape with counts.
#[derive(Deserialize, Debug)]
struct ApiPost {
    no: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    time: Option<i64>,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    com: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    replies: u32,
    #[serde(default)]
    images: u32,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn to_catalog_entry(thread: ApiPost) -> CatalogEntry {
    let subject = thread
        .sub
        .as_deref()
        .map(markup::to_plain_text)
        .filter(|s| !s.trim().is_empty());
    let title = subject.unwrap_or_else(|| {
        thread
            .com
            .as_deref()
            .map(|com| markup::teaser(com, TEASER_CHARS))
            .unwrap_or_default()
    });

    CatalogEntry {
        title,
        reply_count: thread.replies,
        image_count: thread.images,
        thread_id: thread.no.to_string(),
    }
}

fn to_post(post: ApiPost) -> Post {
    let attachment = match (post.filename, post.ext) {
        (Some(name), Some(ext)) => Some(format!("{name}{ext}")),
        (Some(name), None) => Some(name),
        _ => None,
    };

    Post {
        number: post.no.to_string(),
        author: post.name.unwrap_or_else(|| "Anonymous".to_string()),
        posted_at: post.time.and_then(|t| DateTime::from_timestamp(t, 0)),
        subject: post.sub.as_deref().map(markup::to_plain_text),
        comment: post
            .com
            .as_deref()
            .map(markup::to_plain_text)
            .unwrap_or_default(),
        attachment,
    }
}

/// Strips surrounding slashes so `/g/` and `g` address the same board.
fn board_path(board_id: &str) -> &str {
    board_id.trim_matches('/')
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct ChanApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ChanApiProvider {
    pub fn new(base_url: Option<String>, user_agent: &str) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with user agent ({}), using defaults", e);
                reqwest::Client::new()
            });

        Self { base_url, client }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            // Error bodies are often whole HTML pages; they go to the log only
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!("API error for {}: {} - {}", url, status, body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unexpected status").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DataProvider for ChanApiProvider {
    fn name(&self) -> &str {
        "chan-api"
    }

    async fn list_boards(&self) -> Result<Vec<String>, ProviderError> {
        let list: BoardList = self.get_json("boards.json").await?;
        info!("Fetched {} boards", list.boards.len());
        Ok(list.boards.into_iter().map(|b| b.board).collect())
    }

    async fn fetch_catalog(&self, board_id: &str) -> Result<Vec<CatalogEntry>, ProviderError> {
        let pages: Vec<CatalogPage> = self
            .get_json(&format!("{}/catalog.json", board_path(board_id)))
            .await?;
        let entries: Vec<CatalogEntry> = pages
            .into_iter()
            .flat_map(|page| page.threads)
            .map(to_catalog_entry)
            .collect();
        info!("Fetched catalog for /{}/: {} threads", board_path(board_id), entries.len());
        Ok(entries)
    }

    async fn fetch_thread(
        &self,
        board_id: &str,
        thread_id: &str,
    ) -> Result<Vec<Post>, ProviderError> {
        let thread: ThreadResponse = self
            .get_json(&format!("{}/thread/{}.json", board_path(board_id), thread_id))
            .await?;
        info!(
            "Fetched thread /{}/{}: {} posts",
            board_path(board_id),
            thread_id,
            thread.posts.len()
        );
        Ok(thread.posts.into_iter().map(to_post).collect())
    }
}
