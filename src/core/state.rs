//! # Navigation State
//!
//! Where the user is and how keys are being interpreted.
//!
//! ```text
//! NavigationState
//! ├── level: Level                    // Index → Board → Thread
//! ├── mode: Mode                      // Normal | Insert
//! ├── board_id: Option<String>        // set at Board and Thread
//! ├── thread_id: Option<String>       // set at Thread only
//! ├── filter_pattern: Option<String>  // set at Board only
//! ├── item_count: usize               // from the last rebuild
//! └── last_build_duration_secs: f64   // from the last rebuild
//! ```
//!
//! Values are immutable: every transition returns a new `NavigationState`.
//! Level-changing transitions return `None` when their precondition does not
//! hold, including any attempt to change level while in Insert mode.

use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::NavError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Index,
    Board,
    Thread,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "Normal",
            Mode::Insert => "Insert",
        }
    }
}

/// Result of going back one level.
#[derive(Debug, Clone, PartialEq)]
pub enum Back {
    To(NavigationState),
    /// Back from the index ends the session.
    Exit,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NavigationState {
    level: Level,
    mode: Mode,
    board_id: Option<String>,
    thread_id: Option<String>,
    filter_pattern: Option<String>,
    item_count: usize,
    last_build_duration_secs: f64,
}

/// Compiles a catalog filter. Matching is an unanchored regex search on titles.
pub fn compile_filter(pattern: &str) -> Result<Regex, NavError> {
    Regex::new(pattern).map_err(|e| NavError::InvalidFilterPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl NavigationState {
    /// The session starts on the index in Normal mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn board_id(&self) -> Option<&str> {
        self.board_id.as_deref()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn filter_pattern(&self) -> Option<&str> {
        self.filter_pattern.as_deref()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn last_build_duration_secs(&self) -> f64 {
        self.last_build_duration_secs
    }

    /// Index → Board.
    pub fn select_board(&self, board_id: &str) -> Option<Self> {
        if self.level != Level::Index || self.mode != Mode::Normal || board_id.is_empty() {
            return None;
        }
        Some(Self {
            level: Level::Board,
            board_id: Some(board_id.to_string()),
            ..Self::default()
        })
    }

    /// Board → Thread. The catalog filter does not follow into the thread.
    pub fn select_thread(&self, thread_id: &str) -> Option<Self> {
        if self.level != Level::Board || self.mode != Mode::Normal || thread_id.is_empty() {
            return None;
        }
        Some(Self {
            level: Level::Thread,
            board_id: self.board_id.clone(),
            thread_id: Some(thread_id.to_string()),
            ..Self::default()
        })
    }

    /// Goes up one level. Returns `None` while in Insert mode.
    pub fn back(&self) -> Option<Back> {
        if self.mode != Mode::Normal {
            return None;
        }
        let back = match self.level {
            Level::Index => Back::Exit,
            Level::Board => Back::To(Self::default()),
            Level::Thread => Back::To(Self {
                level: Level::Board,
                board_id: self.board_id.clone(),
                ..Self::default()
            }),
        };
        Some(back)
    }

    /// Normal → Insert. Level and data are untouched.
    pub fn enter_insert(&self) -> Self {
        Self {
            mode: Mode::Insert,
            ..self.clone()
        }
    }

    /// Insert → Normal, used by both commit and cancel.
    pub fn leave_insert(&self) -> Self {
        Self {
            mode: Mode::Normal,
            ..self.clone()
        }
    }

    /// Sets or clears the catalog filter. Only valid at Board level; an invalid
    /// pattern is rejected and the caller keeps its current state.
    pub fn with_filter(&self, pattern: Option<&str>) -> Result<Self, NavError> {
        if self.level != Level::Board {
            return Err(NavError::FilterUnavailable);
        }
        let filter_pattern = match pattern {
            Some(p) if !p.is_empty() => {
                compile_filter(p)?;
                Some(p.to_string())
            }
            _ => None,
        };
        Ok(Self {
            filter_pattern,
            ..self.clone()
        })
    }

    /// Records the metrics of a finished rebuild.
    pub fn with_metrics(&self, item_count: usize, duration: Duration) -> Self {
        Self {
            item_count,
            last_build_duration_secs: duration.as_secs_f64(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_board(id: &str) -> NavigationState {
        NavigationState::new().select_board(id).unwrap()
    }

    fn at_thread(board: &str, thread: &str) -> NavigationState {
        at_board(board).select_thread(thread).unwrap()
    }

    #[test]
    fn test_new_starts_at_index_normal() {
        let state = NavigationState::new();
        assert_eq!(state.level(), Level::Index);
        assert_eq!(state.mode(), Mode::Normal);
        assert!(state.board_id().is_none());
        assert!(state.thread_id().is_none());
        assert!(state.filter_pattern().is_none());
    }

    #[test]
    fn test_select_board_from_index() {
        let state = NavigationState::new()
            .with_metrics(70, Duration::from_millis(3))
            .select_board("g")
            .unwrap();
        assert_eq!(state.level(), Level::Board);
        assert_eq!(state.board_id(), Some("g"));
        assert_eq!(state.item_count(), 0, "metrics reset pending rebuild");
        assert_eq!(state.last_build_duration_secs(), 0.0);
    }

    #[test]
    fn test_select_board_rejected_outside_index() {
        assert!(at_board("g").select_board("v").is_none());
        assert!(at_thread("g", "1").select_board("v").is_none());
        assert!(NavigationState::new().select_board("").is_none());
    }

    #[test]
    fn test_select_thread_only_from_board() {
        assert!(NavigationState::new().select_thread("1").is_none());
        assert!(at_thread("g", "1").select_thread("2").is_none());

        let state = at_thread("g", "123");
        assert_eq!(state.level(), Level::Thread);
        assert_eq!(state.board_id(), Some("g"));
        assert_eq!(state.thread_id(), Some("123"));
    }

    #[test]
    fn test_select_thread_clears_filter() {
        let filtered = at_board("g").with_filter(Some("anime")).unwrap();
        let thread = filtered.select_thread("5").unwrap();
        assert!(thread.filter_pattern().is_none());
    }

    #[test]
    fn test_back_table() {
        assert_eq!(NavigationState::new().back(), Some(Back::Exit));

        let from_board = at_board("g").with_filter(Some("x")).unwrap().back();
        assert_eq!(from_board, Some(Back::To(NavigationState::new())));

        match at_thread("g", "9").back() {
            Some(Back::To(state)) => {
                assert_eq!(state.level(), Level::Board);
                assert_eq!(state.board_id(), Some("g"));
                assert!(state.thread_id().is_none());
            }
            other => panic!("Expected Board, got {:?}", other),
        }
    }

    #[test]
    fn test_level_changes_blocked_in_insert() {
        let index = NavigationState::new().enter_insert();
        assert!(index.select_board("g").is_none());
        assert!(index.back().is_none());

        let board = at_board("g").enter_insert();
        assert!(board.select_thread("1").is_none());
        assert!(board.back().is_none());
    }

    #[test]
    fn test_insert_round_trip_keeps_level() {
        let board = at_board("g");
        let inserted = board.enter_insert();
        assert_eq!(inserted.mode(), Mode::Insert);
        assert_eq!(inserted.level(), Level::Board);
        assert_eq!(inserted.leave_insert(), board);
    }

    #[test]
    fn test_filter_only_at_board() {
        assert_eq!(
            NavigationState::new().with_filter(Some("a")),
            Err(NavError::FilterUnavailable)
        );
        assert_eq!(
            at_thread("g", "1").with_filter(Some("a")),
            Err(NavError::FilterUnavailable)
        );
    }

    #[test]
    fn test_invalid_filter_reports_and_keeps_pattern() {
        let state = at_board("g").with_filter(Some("anime")).unwrap();
        let result = state.with_filter(Some("[unclosed"));
        assert!(matches!(
            result,
            Err(NavError::InvalidFilterPattern { ref pattern, .. }) if pattern == "[unclosed"
        ));
        assert_eq!(state.filter_pattern(), Some("anime"));
    }

    #[test]
    fn test_clear_filter() {
        let state = at_board("g").with_filter(Some("anime")).unwrap();
        assert!(state.with_filter(None).unwrap().filter_pattern().is_none());
        assert!(state.with_filter(Some("")).unwrap().filter_pattern().is_none());
    }

    #[test]
    fn test_serde_round_trip_preserves_state() {
        let state = at_board("g")
            .with_filter(Some("rust|go"))
            .unwrap()
            .with_metrics(2, Duration::from_millis(250));
        let json = serde_json::to_string(&state).unwrap();
        let back: NavigationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
