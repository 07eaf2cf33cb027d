use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one thread as it appears in a board catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub reply_count: u32,
    pub image_count: u32,
    pub thread_id: String,
}

/// A single post inside a thread. `comment` is plain text, markup already removed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub number: String,
    pub author: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub subject: Option<String>,
    pub comment: String,
    /// Original filename of the attached image, if any.
    pub attachment: Option<String>,
}

/// What the session needs fetched before a transition can complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Catalog { board_id: String },
    Thread { board_id: String, thread_id: String },
}

impl FetchRequest {
    /// Short human label used by the loading view, e.g. `/g/` or `/g/ › 123`.
    pub fn label(&self) -> String {
        match self {
            FetchRequest::Catalog { board_id } => format!("/{board_id}/"),
            FetchRequest::Thread {
                board_id,
                thread_id,
            } => format!("/{board_id}/ › {thread_id}"),
        }
    }
}

/// Data returned for a `FetchRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Catalog(Vec<CatalogEntry>),
    Thread(Vec<Post>),
}

/// Last-good data held by the session.
///
/// `catalog` belongs to the current board and survives a trip into one of its
/// threads; `posts` belongs to the current thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSnapshot {
    pub catalog: Vec<CatalogEntry>,
    pub posts: Vec<Post>,
}
