//! # Frame Controller
//!
//! Owns what is on screen: the last presented `RenderTree`, which region has
//! focus, and which body element is selected. Trees are only ever swapped in
//! whole; nothing here edits a tree in place.

use std::mem::discriminant;

use crate::core::action::Action;
use crate::core::state::Mode;
use crate::core::view::{BodyNode, RenderTree};

/// Rows jumped by PageUp / PageDown.
const PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Body,
    /// The command bar
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

#[derive(Debug)]
pub struct FrameController {
    tree: Option<RenderTree>,
    focus: Focus,
    selected: usize,
}

impl Default for FrameController {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameController {
    pub fn new() -> Self {
        Self {
            tree: None,
            focus: Focus::Body,
            selected: 0,
        }
    }

    /// Replaces the current tree.
    ///
    /// The selection survives when the new body shows the same kind of content at
    /// the same location (e.g. a filter change) and is clamped to the new length.
    /// Otherwise it goes back to the first element.
    pub fn present(&mut self, tree: RenderTree) {
        let same_place = self.tree.as_ref().is_some_and(|old| {
            discriminant(&old.body) == discriminant(&tree.body)
                && old.header.location == tree.header.location
        });
        if same_place {
            self.selected = self.selected.min(tree.body.len().saturating_sub(1));
        } else {
            self.selected = 0;
        }

        self.focus = match tree.footer.mode {
            Mode::Insert => Focus::Footer,
            Mode::Normal => Focus::Body,
        };
        self.tree = Some(tree);
    }

    pub fn tree(&self) -> Option<&RenderTree> {
        self.tree.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Index of the selected body element, `None` when the body is empty.
    pub fn selection(&self) -> Option<usize> {
        let len = self.tree.as_ref()?.body.len();
        (len > 0).then_some(self.selected.min(len - 1))
    }

    pub fn move_selection(&mut self, movement: CursorMove) {
        let Some(len) = self.tree.as_ref().map(|t| t.body.len()) else {
            return;
        };
        if len == 0 || self.focus != Focus::Body {
            return;
        }
        let last = len - 1;
        self.selected = match movement {
            CursorMove::Up => self.selected.saturating_sub(1),
            CursorMove::Down => (self.selected + 1).min(last),
            CursorMove::PageUp => self.selected.saturating_sub(PAGE),
            CursorMove::PageDown => (self.selected + PAGE).min(last),
            CursorMove::Home => 0,
            CursorMove::End => last,
        };
    }

    /// The navigation the selected element stands for: a board tile opens its
    /// board, a catalog card opens its thread. Posts are not navigable.
    pub fn selected_target(&self) -> Option<Action> {
        let index = self.selection()?;
        match &self.tree.as_ref()?.body {
            BodyNode::Boards(tiles) => Some(Action::SelectBoard(tiles[index].board_id.clone())),
            BodyNode::Catalog(cards) => Some(Action::SelectThread(cards[index].thread_id.clone())),
            BodyNode::Thread(_) | BodyNode::Loading { .. } => None,
        }
    }
}
