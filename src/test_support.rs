//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::time::Duration;

use async_trait::async_trait;

use crate::core::boards::KNOWN_BOARDS;
use crate::data::{CatalogEntry, DataProvider, Post, ProviderError};

/// A provider that serves fixed data, or fails every call with one error.
pub struct StaticProvider {
    catalog: Vec<CatalogEntry>,
    posts: Vec<Post>,
    error: Option<ProviderError>,
}

impl StaticProvider {
    pub fn new(catalog: Vec<CatalogEntry>, posts: Vec<Post>) -> Self {
        Self {
            catalog,
            posts,
            error: None,
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            catalog: Vec::new(),
            posts: Vec::new(),
            error: Some(error),
        }
    }

    fn check(&self) -> Result<(), ProviderError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn list_boards(&self) -> Result<Vec<String>, ProviderError> {
        self.check()?;
        Ok(KNOWN_BOARDS.iter().map(|b| b.to_string()).collect())
    }

    async fn fetch_catalog(&self, _board_id: &str) -> Result<Vec<CatalogEntry>, ProviderError> {
        self.check()?;
        Ok(self.catalog.clone())
    }

    async fn fetch_thread(&self, _board_id: &str, _thread_id: &str) -> Result<Vec<Post>, ProviderError> {
        self.check()?;
        Ok(self.posts.clone())
    }
}

/// A provider that sleeps before answering with empty data.
pub struct SlowProvider {
    pub delay: Duration,
}

#[async_trait]
impl DataProvider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    async fn list_boards(&self) -> Result<Vec<String>, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn fetch_catalog(&self, _board_id: &str) -> Result<Vec<CatalogEntry>, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn fetch_thread(&self, _board_id: &str, _thread_id: &str) -> Result<Vec<Post>, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }
}

fn entry(thread_id: &str, title: &str, reply_count: u32, image_count: u32) -> CatalogEntry {
    CatalogEntry {
        title: title.to_string(),
        reply_count,
        image_count,
        thread_id: thread_id.to_string(),
    }
}

/// Three threads, deliberately not sorted by id.
pub fn sample_catalog() -> Vec<CatalogEntry> {
    vec![
        entry("300", "Seasonal anime general", 412, 120),
        entry("100", "Rust programming thread", 57, 3),
        entry("200", "Desktop thread", 230, 198),
    ]
}

/// Opening post plus one reply using quote and greentext lines.
pub fn sample_posts() -> Vec<Post> {
    vec![
        Post {
            number: "100".to_string(),
            author: "Anonymous".to_string(),
            posted_at: None,
            subject: Some("Rust programming thread".to_string()),
            comment: "What are you working on?".to_string(),
            attachment: Some("ferris.png".to_string()),
        },
        Post {
            number: "101".to_string(),
            author: "Anonymous".to_string(),
            posted_at: None,
            subject: None,
            comment: ">>100\n>be me\nnice thread".to_string(),
            attachment: None,
        },
    ]
}
