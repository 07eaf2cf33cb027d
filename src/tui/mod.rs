//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, paints the current
//! `RenderTree`, translates keyboard events into `core::Action` values and runs
//! the fetches the reducer asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! crossterm event → KeyRouter → Action → update() → Effect
//!                                                    ├─ Present → rebuild → FrameController::present
//!                                                    ├─ Fetch   → spawn task, present loading tree
//!                                                    └─ Quit
//! fetch task → mpsc → Action::DataLoaded → update() → ...
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events or finished fetches.

mod component;
mod components;
mod event;
mod frame;
mod router;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;
use tui_scrollview::ScrollViewState;

use crate::core::action::{Action, Effect, FetchTicket, Session, update};
use crate::core::config::ResolvedConfig;
use crate::data::{ChanApiProvider, DataProvider, fetch_with_timeout};
use crate::tui::event::{poll_event_immediate, poll_event_timeout};
use crate::tui::frame::FrameController;
use crate::tui::router::{KeyRouter, Routed};

/// TUI-specific presentation state (not part of the navigation state)
pub struct TuiState {
    pub frames: FrameController,
    pub router: KeyRouter,
    pub thread_scroll: ScrollViewState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            frames: FrameController::new(),
            router: KeyRouter::new(),
            thread_scroll: ScrollViewState::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Harmlessly ignored by terminals without the Kitty keyboard protocol
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Carries out the effects the reducer returns.
struct Runtime {
    provider: Arc<dyn DataProvider>,
    fetch_timeout: Duration,
    tx: mpsc::Sender<Action>,
    active_fetch: Option<AbortHandle>,
}

impl Runtime {
    fn new(provider: Arc<dyn DataProvider>, fetch_timeout: Duration, tx: mpsc::Sender<Action>) -> Self {
        Self {
            provider,
            fetch_timeout,
            tx,
            active_fetch: None,
        }
    }

    /// Reduces one action and performs its effect. Returns `true` to quit.
    fn dispatch(&mut self, session: &mut Session, frames: &mut FrameController, action: Action) -> bool {
        let effect = update(session, action);
        let quit = match effect {
            Effect::None => false,
            Effect::Present => {
                frames.present(session.rebuild());
                false
            }
            Effect::Fetch(ticket) => {
                self.abort_active();
                self.active_fetch = Some(self.spawn_fetch(ticket));
                frames.present(session.rebuild());
                false
            }
            Effect::Quit => true,
        };

        // The session stopped waiting (cancelled, quit or done): stop the task too
        if !session.is_loading() {
            self.abort_active();
        }
        quit
    }

    fn abort_active(&mut self) {
        if let Some(handle) = self.active_fetch.take() {
            handle.abort();
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) -> AbortHandle {
        info!("Spawning fetch {:?} (ticket {})", ticket.request, ticket.ticket);
        let provider = self.provider.clone();
        let timeout = self.fetch_timeout;
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            let (result, elapsed) = fetch_with_timeout(provider.as_ref(), &ticket.request, timeout).await;
            if tx
                .send(Action::DataLoaded {
                    ticket: ticket.ticket,
                    result,
                    elapsed,
                })
                .is_err()
            {
                warn!("Failed to deliver fetch ticket {}: receiver dropped", ticket.ticket);
            }
        });
        handle.abort_handle()
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider: Arc<dyn DataProvider> = Arc::new(ChanApiProvider::new(
        Some(config.api_base_url.clone()),
        &config.user_agent,
    ));
    info!("Using {} provider", provider.name());

    // Channel for actions from fetch tasks
    let (tx, rx) = mpsc::channel();
    let mut runtime = Runtime::new(provider, config.fetch_timeout, tx);

    let mut session = Session::new();
    let mut tui = TuiState::new();
    tui.frames.present(session.rebuild());

    let mut terminal = ratatui::init();
    let terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Could not enable terminal modes: {}", e);
            None
        }
    };

    let result = event_loop(&mut terminal, &mut session, &mut tui, &mut runtime, &rx);

    runtime.abort_active();
    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Session ended at {:?}", session.nav().level());
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    session: &mut Session,
    tui: &mut TuiState,
    runtime: &mut Runtime,
    rx: &mpsc::Receiver<Action>,
) -> std::io::Result<()> {
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        let animating = session.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            let build_secs = session.nav().last_build_duration_secs();
            terminal.draw(|f| ui::draw_ui(f, tui, build_secs, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while loading, long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match tui.router.handle(session.nav().mode(), &event) {
                Routed::Action(action) => action,
                Routed::Activate => match tui.frames.selected_target() {
                    Some(action) => action,
                    None => continue,
                },
                Routed::Cursor(movement) => {
                    tui.frames.move_selection(movement);
                    continue;
                }
                Routed::Redraw | Routed::Ignored => continue,
            };
            if runtime.dispatch(session, &mut tui.frames, action) {
                should_quit = true;
                break;
            }
        }

        // Finished fetches
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received fetch result");
            should_quit = runtime.dispatch(session, &mut tui.frames, action);
        }
    }
    Ok(())
}
