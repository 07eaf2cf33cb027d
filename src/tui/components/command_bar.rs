//! # CommandBar Component
//!
//! Single-line editor shown at the bottom of the screen. It is the focus target
//! while the session is in Insert mode.
//!
//! ## Responsibilities
//!
//! - Capture text input (chars, paste, backspace/delete, cursor movement)
//! - Emit `Submit(text)` on Enter and `Cancel` on Esc, clearing the buffer either way
//! - Keep the cursor visible by scrolling the text horizontally
//!
//! The bar never interprets what was typed; that is the command dispatcher's job.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::command;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PROMPT: &str = ": ";
/// Left + right borders
const HORIZONTAL_OVERHEAD: u16 = 2;

/// High-level events emitted by the CommandBar
#[derive(Debug, Clone, PartialEq)]
pub enum CommandBarEvent {
    /// Enter pressed; carries the whole line, possibly blank
    Submit(String),
    /// Esc pressed; the line was discarded
    Cancel,
    ContentChanged,
}

/// Command line editor.
///
/// # Props
///
/// - `focused`: whether the session is in Insert mode
///
/// # State
///
/// - `buffer`: current line
/// - `cursor`: byte offset into `buffer`, always on a char boundary
#[derive(Debug, Default)]
pub struct CommandBar {
    pub buffer: String,
    pub focused: bool,
    cursor: usize,
}

impl CommandBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Columns hidden on the left so the cursor fits in `visible` columns.
    fn scroll_columns(&self, visible: usize) -> usize {
        let before = self.buffer[..self.cursor].width();
        before.saturating_sub(visible.saturating_sub(1))
    }

    fn title(&self) -> String {
        if self.focused {
            let hint: Vec<_> = command::verbs().collect();
            format!("Command ({})", hint.join(", "))
        } else {
            "Command (i or : to type)".to_string()
        }
    }
}

/// Drops characters from the front of `text` until `skip` columns are gone.
fn skip_columns(text: &str, skip: usize) -> &str {
    let mut skipped = 0;
    for (i, c) in text.char_indices() {
        if skipped >= skip {
            return &text[i..];
        }
        skipped += unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
    }
    ""
}

impl Component for CommandBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        let visible = inner.saturating_sub(PROMPT.width());
        let skip = self.scroll_columns(visible);

        let border_style = if self.focused {
            Style::default().fg(Color::LightCyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title());

        let line = Line::from(vec![
            Span::styled(PROMPT, border_style),
            Span::raw(skip_columns(&self.buffer, skip)),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused {
            let column = PROMPT.width() + self.buffer[..self.cursor].width() - skip;
            let x = area.x + 1 + column as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}

impl EventHandler for CommandBar {
    type Event = CommandBarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Char(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(CommandBarEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // One line only
                let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(CommandBarEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                CommandBarEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                CommandBarEvent::ContentChanged
            }),
            TuiEvent::Left => (self.cursor > 0).then(|| {
                self.cursor = self.prev_boundary();
                CommandBarEvent::ContentChanged
            }),
            TuiEvent::Right => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = self.next_boundary();
                CommandBarEvent::ContentChanged
            }),
            TuiEvent::Home => (self.cursor != 0).then(|| {
                self.cursor = 0;
                CommandBarEvent::ContentChanged
            }),
            TuiEvent::End => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                CommandBarEvent::ContentChanged
            }),
            TuiEvent::Enter => Some(CommandBarEvent::Submit(self.take())),
            TuiEvent::Escape => {
                self.clear();
                Some(CommandBarEvent::Cancel)
            }
            _ => None,
        }
    }
}
