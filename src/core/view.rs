//! # View Builder
//!
//! Derives a complete `RenderTree` from a `NavigationState` and a `DataSnapshot`.
//! The tree is plain data: the TUI paints it, tests compare it.
//!
//! ```text
//! (NavigationState, DataSnapshot)  →  build()  →  BuildOutput { tree, item_count, duration }
//! ```
//!
//! Building is pure and deterministic. The measured `duration` is not part of the
//! tree, so two builds from the same inputs produce equal trees.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::warn;

use crate::core::boards::{KNOWN_BOARDS, board_label};
use crate::core::state::{Level, Mode, NavigationState, compile_filter};
use crate::data::{CatalogEntry, DataSnapshot, FetchRequest, Post};

pub const APP_TITLE: &str = "CommandChan";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    pub header: HeaderNode,
    pub body: BodyNode,
    pub footer: FooterNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderNode {
    pub title: String,
    /// Breadcrumb such as `Index`, `/g/` or `/g/ › 123456`.
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyNode {
    Boards(Vec<BoardTile>),
    Catalog(Vec<CatalogCard>),
    Thread(Vec<PostNode>),
    Loading { target: String },
}

impl BodyNode {
    /// Number of selectable elements in the body.
    pub fn len(&self) -> usize {
        match self {
            BodyNode::Boards(tiles) => tiles.len(),
            BodyNode::Catalog(cards) => cards.len(),
            BodyNode::Thread(posts) => posts.len(),
            BodyNode::Loading { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardTile {
    pub board_id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCard {
    pub thread_id: String,
    pub title: String,
    pub reply_count: u32,
    pub image_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostNode {
    pub number: String,
    pub author: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub subject: Option<String>,
    pub attachment: Option<String>,
    pub lines: Vec<CommentLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Plain,
    /// `>>12345` reply link
    QuoteLink,
    /// `>implying`
    Greentext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterNode {
    pub mode: Mode,
    /// `Index` or the board label.
    pub board: String,
    pub filter: Option<String>,
    pub item_count: usize,
    /// Transient error or status text.
    pub notice: Option<String>,
}

impl RenderTree {
    /// Attaches a transient notice to the footer.
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.footer.notice = notice;
        self
    }
}

pub struct BuildOutput {
    pub tree: RenderTree,
    pub item_count: usize,
    pub duration: Duration,
}

/// Builds the render tree for `state` from `data`.
pub fn build(state: &NavigationState, data: &DataSnapshot) -> BuildOutput {
    let started = Instant::now();

    let body = match state.level() {
        Level::Index => BodyNode::Boards(board_tiles()),
        Level::Board => BodyNode::Catalog(catalog_cards(&data.catalog, state.filter_pattern())),
        Level::Thread => BodyNode::Thread(data.posts.iter().map(post_node).collect()),
    };
    let item_count = body.len();

    let tree = RenderTree {
        header: header(state),
        body,
        footer: footer(state, item_count),
    };

    BuildOutput {
        tree,
        item_count,
        duration: started.elapsed(),
    }
}

/// Tree shown while `request` is in flight. Header and footer still describe
/// `current`, since the transition has not happened yet.
pub fn build_loading(current: &NavigationState, request: &FetchRequest) -> RenderTree {
    RenderTree {
        header: header(current),
        body: BodyNode::Loading {
            target: request.label(),
        },
        footer: footer(current, current.item_count()),
    }
}

fn header(state: &NavigationState) -> HeaderNode {
    let location = match (state.board_id(), state.thread_id()) {
        (Some(board), Some(thread)) => format!("{} › {}", board_label(board), thread),
        (Some(board), None) => board_label(board),
        _ => "Index".to_string(),
    };
    HeaderNode {
        title: APP_TITLE.to_string(),
        location,
    }
}

fn footer(state: &NavigationState, item_count: usize) -> FooterNode {
    FooterNode {
        mode: state.mode(),
        board: state
            .board_id()
            .map(board_label)
            .unwrap_or_else(|| "Index".to_string()),
        filter: state.filter_pattern().map(str::to_string),
        item_count,
        notice: None,
    }
}

fn board_tiles() -> Vec<BoardTile> {
    KNOWN_BOARDS
        .iter()
        .map(|id| BoardTile {
            board_id: id.to_string(),
            label: board_label(id),
        })
        .collect()
}

fn catalog_cards(entries: &[CatalogEntry], filter: Option<&str>) -> Vec<CatalogCard> {
    let matcher = filter.and_then(|pattern| match compile_filter(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            // Transitions never store an invalid pattern; only a hand-edited
            // deserialized state can get here.
            warn!("Ignoring stored filter: {}", e);
            None
        }
    });

    entries
        .iter()
        .filter_map(|entry| {
            // Slug-style titles read (and match) as words
            let title = entry.title.replace('-', " ");
            matcher
                .as_ref()
                .is_none_or(|re| re.is_match(&title))
                .then(|| CatalogCard {
                    thread_id: entry.thread_id.clone(),
                    title,
                    reply_count: entry.reply_count,
                    image_count: entry.image_count,
                })
        })
        .collect()
}

fn post_node(post: &Post) -> PostNode {
    PostNode {
        number: post.number.clone(),
        author: post.author.clone(),
        posted_at: post.posted_at,
        subject: post.subject.clone().filter(|s| !s.trim().is_empty()),
        attachment: post.attachment.clone(),
        lines: post.comment.lines().map(comment_line).collect(),
    }
}

fn comment_line(line: &str) -> CommentLine {
    let trimmed = line.trim_start();
    let kind = if trimmed.starts_with(">>") {
        LineKind::QuoteLink
    } else if trimmed.starts_with('>') {
        LineKind::Greentext
    } else {
        LineKind::Plain
    };
    CommentLine {
        kind,
        text: line.to_string(),
    }
}
