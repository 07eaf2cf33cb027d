//! # Key Router
//!
//! Interprets each terminal event according to the session's mode.
//!
//! ```text
//! Insert:  chars / paste / editing  → command bar
//!          Enter                    → CommitInsert(line)
//!          Esc                      → CancelInsert
//! Normal:  i, :                     → EnterInsert
//!          r                        → Refresh
//!          q                        → Back
//!          w e s d                  → reserved
//!          j k ↑ ↓ PgUp PgDn Home End → body selection
//!          Enter                    → activate selection
//! Both:    Ctrl+C                   → Quit
//! ```

use crate::core::action::{Action, Reserved};
use crate::core::state::Mode;
use crate::tui::component::EventHandler;
use crate::tui::components::{CommandBar, CommandBarEvent};
use crate::tui::event::TuiEvent;
use crate::tui::frame::CursorMove;

/// What the event loop should do with one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    Action(Action),
    Cursor(CursorMove),
    /// Open whatever the body selection points at
    Activate,
    /// Only presentation changed (command bar edit, resize)
    Redraw,
    Ignored,
}

#[derive(Debug, Default)]
pub struct KeyRouter {
    command_bar: CommandBar,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command_bar_mut(&mut self) -> &mut CommandBar {
        &mut self.command_bar
    }

    pub fn handle(&mut self, mode: Mode, event: &TuiEvent) -> Routed {
        match event {
            TuiEvent::ForceQuit => return Routed::Action(Action::Quit),
            TuiEvent::Resize => return Routed::Redraw,
            _ => {}
        }
        match mode {
            Mode::Insert => self.handle_insert(event),
            Mode::Normal => handle_normal(event),
        }
    }

    fn handle_insert(&mut self, event: &TuiEvent) -> Routed {
        match self.command_bar.handle_event(event) {
            Some(CommandBarEvent::Submit(line)) => Routed::Action(Action::CommitInsert(line)),
            Some(CommandBarEvent::Cancel) => Routed::Action(Action::CancelInsert),
            Some(CommandBarEvent::ContentChanged) => Routed::Redraw,
            None => Routed::Ignored,
        }
    }
}

fn handle_normal(event: &TuiEvent) -> Routed {
    match event {
        TuiEvent::Char('i' | ':') => Routed::Action(Action::EnterInsert),
        TuiEvent::Char('r') => Routed::Action(Action::Refresh),
        TuiEvent::Char('q') => Routed::Action(Action::Back),
        TuiEvent::Char('w') => Routed::Action(Action::Reserved(Reserved::Watch)),
        TuiEvent::Char('e') => Routed::Action(Action::Reserved(Reserved::ExpandWatcher)),
        TuiEvent::Char('s') => Routed::Action(Action::Reserved(Reserved::SplitView)),
        TuiEvent::Char('d') => Routed::Action(Action::Reserved(Reserved::DeleteWatched)),
        TuiEvent::Char('k') | TuiEvent::Up => Routed::Cursor(CursorMove::Up),
        TuiEvent::Char('j') | TuiEvent::Down => Routed::Cursor(CursorMove::Down),
        TuiEvent::PageUp => Routed::Cursor(CursorMove::PageUp),
        TuiEvent::PageDown => Routed::Cursor(CursorMove::PageDown),
        TuiEvent::Home => Routed::Cursor(CursorMove::Home),
        TuiEvent::End => Routed::Cursor(CursorMove::End),
        TuiEvent::Enter => Routed::Activate,
        _ => Routed::Ignored,
    }
}
