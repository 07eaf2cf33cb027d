//! # Actions
//!
//! Everything that can happen in CommandChan becomes an `Action`.
//! User presses `q`? That's `Action::Back`.
//! A catalog arrives? That's `Action::DataLoaded { .. }`.
//!
//! The `update()` function takes the session and an action, swaps in the next
//! `NavigationState` and returns an `Effect` telling the event loop what to do.
//! No I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Effect (Present | Fetch | Quit | None)
//! ```
//!
//! Transitions that need data do not happen right away: the target state is kept
//! as a pending fetch, the loop shows a loading view, and the state only changes
//! when `DataLoaded` arrives with the matching ticket.

use std::time::Duration;

use log::{debug, info, warn};

use crate::core::command::{self, Command};
use crate::core::error::NavError;
use crate::core::state::{Back, Level, Mode, NavigationState};
use crate::core::view::{self, RenderTree};
use crate::data::{DataSnapshot, FetchRequest, Fetched, ProviderError};

/// Key bindings reserved for features that do not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    Watch,
    ExpandWatcher,
    SplitView,
    DeleteWatched,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectBoard(String),
    SelectThread(String),
    Back,
    Refresh,
    EnterInsert,
    CommitInsert(String),
    CancelInsert,
    SetFilter(Option<String>),
    Quit,
    Reserved(Reserved),
    DataLoaded {
        ticket: u64,
        result: Result<Fetched, ProviderError>,
        elapsed: Duration,
    },
}

/// Identifies one in-flight fetch. Results carrying an older ticket are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub ticket: u64,
    pub request: FetchRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Rebuild and present the view.
    Present,
    /// Present the loading view and start this fetch.
    Fetch(FetchTicket),
    Quit,
}

#[derive(Debug, Clone)]
struct PendingFetch {
    ticket: FetchTicket,
    target: NavigationState,
}

/// Session state owned by the event loop.
pub struct Session {
    nav: NavigationState,
    data: DataSnapshot,
    pending: Option<PendingFetch>,
    notice: Option<String>,
    next_ticket: u64,
    /// Fetch time not yet folded into a build measurement.
    unmeasured_fetch: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            nav: NavigationState::new(),
            data: DataSnapshot::default(),
            pending: None,
            notice: None,
            next_ticket: 0,
            unmeasured_fetch: Duration::ZERO,
        }
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn data(&self) -> &DataSnapshot {
        &self.data
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Ticket of the fetch the session is waiting on, if any.
    pub fn pending_ticket(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.ticket.ticket)
    }

    /// Derives a fresh render tree and records its metrics on the state.
    pub fn rebuild(&mut self) -> RenderTree {
        if let Some(pending) = &self.pending {
            return view::build_loading(&self.nav, &pending.ticket.request)
                .with_notice(self.notice.clone());
        }

        let output = view::build(&self.nav, &self.data);
        let total = output.duration + std::mem::take(&mut self.unmeasured_fetch);
        self.nav = self.nav.with_metrics(output.item_count, total);
        debug!(
            "Rebuilt {:?} view: {} items in {:?}",
            self.nav.level(),
            output.item_count,
            total
        );
        output.tree.with_notice(self.notice.clone())
    }

    fn report(&mut self, error: NavError) {
        warn!("{}", error);
        self.notice = Some(error.to_string());
    }

    fn begin_fetch(&mut self, target: NavigationState, request: FetchRequest) -> Effect {
        self.next_ticket += 1;
        let ticket = FetchTicket {
            ticket: self.next_ticket,
            request,
        };
        info!("Fetching {:?} (ticket {})", ticket.request, ticket.ticket);
        self.pending = Some(PendingFetch {
            ticket: ticket.clone(),
            target,
        });
        Effect::Fetch(ticket)
    }

    fn complete_fetch(
        &mut self,
        ticket: u64,
        result: Result<Fetched, ProviderError>,
        elapsed: Duration,
    ) -> Effect {
        let Some(pending) = self.pending.take_if(|p| p.ticket.ticket == ticket) else {
            debug!("Dropping result for stale fetch ticket {}", ticket);
            return Effect::None;
        };

        match result {
            Ok(Fetched::Catalog(entries)) => {
                self.data.catalog = entries;
                self.data.posts.clear();
            }
            Ok(Fetched::Thread(posts)) => {
                self.data.posts = posts;
            }
            Err(e) => {
                // Stay put with the last-good data on screen
                self.report(NavError::Fetch(e));
                return Effect::Present;
            }
        }

        self.nav = pending.target;
        self.unmeasured_fetch = elapsed;
        Effect::Present
    }

    /// Cancels the in-flight fetch, if any. Returns whether one was cancelled.
    fn cancel_fetch(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                info!("Cancelled fetch {:?}", pending.ticket.request);
                true
            }
            None => false,
        }
    }
}

/// Applies one action to the session.
pub fn update(session: &mut Session, action: Action) -> Effect {
    // Notices last until the next user action
    if !matches!(action, Action::DataLoaded { .. }) {
        session.notice = None;
    }

    match action {
        Action::DataLoaded {
            ticket,
            result,
            elapsed,
        } => session.complete_fetch(ticket, result, elapsed),
        Action::Quit => {
            session.cancel_fetch();
            let mut nav = session.nav.leave_insert();
            while let Some(Back::To(previous)) = nav.back() {
                nav = previous;
            }
            session.nav = nav;
            info!("Quit requested");
            Effect::Quit
        }
        Action::Back => {
            if session.cancel_fetch() {
                return Effect::Present;
            }
            match session.nav.back() {
                Some(Back::Exit) => Effect::Quit,
                Some(Back::To(previous)) => {
                    if previous.level() == Level::Index {
                        session.data.catalog.clear();
                    }
                    session.data.posts.clear();
                    session.nav = previous;
                    Effect::Present
                }
                None => {
                    debug!("Back ignored in {:?} mode", session.nav.mode());
                    Effect::None
                }
            }
        }
        Action::EnterInsert => {
            if session.is_loading() || session.nav.mode() == Mode::Insert {
                return Effect::None;
            }
            session.nav = session.nav.enter_insert();
            Effect::Present
        }
        Action::CancelInsert | Action::CommitInsert(_) if session.nav.mode() != Mode::Insert => {
            debug!("{:?} outside Insert mode", action);
            Effect::None
        }
        Action::CancelInsert => {
            session.nav = session.nav.leave_insert();
            Effect::Present
        }
        Action::CommitInsert(raw) => {
            session.nav = session.nav.leave_insert();
            let Some(command) = Command::parse(&raw) else {
                return Effect::Present;
            };
            info!("Command: {:?}", command);
            match command::dispatch(&command) {
                Ok(next) => match update(session, next) {
                    // The verb is known but the current level rejects it
                    Effect::None => {
                        session.report(NavError::NotAvailableHere {
                            verb: command.verb,
                            level: session.nav.level(),
                        });
                        Effect::Present
                    }
                    effect => effect,
                },
                Err(e) => {
                    session.report(e);
                    Effect::Present
                }
            }
        }
        Action::Reserved(key) => {
            debug!("{:?} is reserved and has no effect yet", key);
            Effect::None
        }
        // Everything below needs an idle session
        _ if session.is_loading() => {
            debug!("Ignoring {:?} while a fetch is in flight", action);
            Effect::None
        }
        Action::SelectBoard(board_id) => match session.nav.select_board(&board_id) {
            Some(target) => session.begin_fetch(target, FetchRequest::Catalog { board_id }),
            None => {
                debug!("select_board({}) not valid from {:?}", board_id, session.nav);
                Effect::None
            }
        },
        Action::SelectThread(thread_id) => match session.nav.select_thread(&thread_id) {
            Some(target) => {
                let request = FetchRequest::Thread {
                    board_id: target.board_id().unwrap_or_default().to_string(),
                    thread_id,
                };
                session.begin_fetch(target, request)
            }
            None => {
                debug!("select_thread({}) not valid from {:?}", thread_id, session.nav);
                Effect::None
            }
        },
        Action::Refresh => {
            if session.nav.mode() != Mode::Normal {
                return Effect::None;
            }
            let nav = session.nav.clone();
            let request = match (nav.board_id(), nav.thread_id()) {
                (Some(board), Some(thread)) => FetchRequest::Thread {
                    board_id: board.to_string(),
                    thread_id: thread.to_string(),
                },
                (Some(board), None) => FetchRequest::Catalog {
                    board_id: board.to_string(),
                },
                // The index is static
                _ => return Effect::None,
            };
            session.begin_fetch(nav, request)
        }
        Action::SetFilter(pattern) => {
            match session.nav.with_filter(pattern.as_deref()) {
                Ok(next) => session.nav = next,
                Err(e) => session.report(e),
            }
            Effect::Present
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_catalog, sample_posts};

    /// Feeds the fetch an effect asked for straight back into the session.
    fn resolve(session: &mut Session, effect: Effect, result: Result<Fetched, ProviderError>) -> Effect {
        let Effect::Fetch(ticket) = effect else {
            panic!("Expected a fetch, got {:?}", effect);
        };
        update(
            session,
            Action::DataLoaded {
                ticket: ticket.ticket,
                result,
                elapsed: Duration::from_millis(5),
            },
        )
    }

    fn session_at_board() -> Session {
        let mut session = Session::new();
        let effect = update(&mut session, Action::SelectBoard("g".to_string()));
        resolve(&mut session, effect, Ok(Fetched::Catalog(sample_catalog())));
        session.rebuild();
        session
    }

    fn session_at_thread() -> Session {
        let mut session = session_at_board();
        let effect = update(&mut session, Action::SelectThread("100".to_string()));
        resolve(&mut session, effect, Ok(Fetched::Thread(sample_posts())));
        session.rebuild();
        session
    }

    #[test]
    fn test_scenario_index_board_filter_back() {
        let mut session = Session::new();
        session.rebuild();
        assert_eq!(session.nav().item_count(), 70);

        let effect = update(&mut session, Action::SelectBoard("g".to_string()));
        assert_eq!(
            effect,
            Effect::Fetch(FetchTicket {
                ticket: 1,
                request: FetchRequest::Catalog {
                    board_id: "g".to_string()
                },
            })
        );
        assert_eq!(session.nav().level(), Level::Index, "no transition until data arrives");

        let effect = resolve(&mut session, effect, Ok(Fetched::Catalog(sample_catalog())));
        assert_eq!(effect, Effect::Present);
        session.rebuild();
        assert_eq!(session.nav().level(), Level::Board);
        assert_eq!(session.nav().board_id(), Some("g"));
        assert_eq!(session.nav().item_count(), 3);
        assert!(session.nav().last_build_duration_secs() >= 0.005);

        assert_eq!(update(&mut session, Action::SetFilter(Some("anime".to_string()))), Effect::Present);
        session.rebuild();
        assert_eq!(session.nav().item_count(), 1);

        assert_eq!(update(&mut session, Action::Back), Effect::Present);
        session.rebuild();
        assert_eq!(session.nav().level(), Level::Index);
        assert_eq!(session.nav().item_count(), 70);
        assert!(session.nav().filter_pattern().is_none());
        assert!(session.nav().board_id().is_none());
    }

    #[test]
    fn test_loading_view_presented_while_pending() {
        let mut session = Session::new();
        update(&mut session, Action::SelectBoard("g".to_string()));
        assert!(session.is_loading());
        let tree = session.rebuild();
        assert_eq!(
            tree.body,
            view::BodyNode::Loading {
                target: "/g/".to_string()
            }
        );
    }

    #[test]
    fn test_fetch_error_keeps_state_and_reports() {
        let mut session = session_at_board();
        let before = session.nav().clone();

        let effect = update(&mut session, Action::SelectThread("100".to_string()));
        let effect = resolve(
            &mut session,
            effect,
            Err(ProviderError::Api {
                status: 404,
                message: "Not Found".to_string(),
            }),
        );

        assert_eq!(effect, Effect::Present);
        assert_eq!(session.nav(), &before);
        assert!(session.notice().unwrap().contains("404"));
        // Last-good catalog still renders
        let tree = session.rebuild();
        assert_eq!(tree.body.len(), 3);
        assert!(tree.footer.notice.is_some());
    }

    #[test]
    fn test_refresh_failure_keeps_catalog() {
        let mut session = session_at_board();
        let effect = update(&mut session, Action::Refresh);
        resolve(&mut session, effect, Err(ProviderError::Timeout(Duration::from_secs(10))));
        assert_eq!(session.data().catalog.len(), 3);
        assert_eq!(session.nav().level(), Level::Board);
    }

    #[test]
    fn test_back_cancels_pending_fetch() {
        let mut session = Session::new();
        let effect = update(&mut session, Action::SelectBoard("g".to_string()));

        assert_eq!(update(&mut session, Action::Back), Effect::Present);
        assert!(!session.is_loading());
        assert_eq!(session.nav().level(), Level::Index, "cancel does not exit");

        // The cancelled fetch reporting late changes nothing
        let late = resolve(&mut session, effect, Ok(Fetched::Catalog(sample_catalog())));
        assert_eq!(late, Effect::None);
        assert_eq!(session.nav().level(), Level::Index);
    }

    #[test]
    fn test_quit_cancels_pending_fetch() {
        let mut session = session_at_board();
        update(&mut session, Action::Refresh);
        assert_eq!(update(&mut session, Action::Quit), Effect::Quit);
        assert!(!session.is_loading());
        assert_eq!(session.nav().level(), Level::Index);
    }

    #[test]
    fn test_back_from_index_quits() {
        let mut session = Session::new();
        assert_eq!(update(&mut session, Action::Back), Effect::Quit);
    }

    #[test]
    fn test_back_from_thread_reuses_catalog() {
        let mut session = session_at_thread();
        assert_eq!(session.nav().item_count(), 2);

        assert_eq!(update(&mut session, Action::Back), Effect::Present);
        session.rebuild();
        assert_eq!(session.nav().level(), Level::Board);
        assert_eq!(session.nav().item_count(), 3);
        assert!(session.data().posts.is_empty());
    }

    #[test]
    fn test_thread_refresh_requests_thread() {
        let mut session = session_at_thread();
        let effect = update(&mut session, Action::Refresh);
        match effect {
            Effect::Fetch(FetchTicket { request, .. }) => assert_eq!(
                request,
                FetchRequest::Thread {
                    board_id: "g".to_string(),
                    thread_id: "100".to_string()
                }
            ),
            other => panic!("Expected fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_refresh_at_index_is_noop() {
        let mut session = Session::new();
        assert_eq!(update(&mut session, Action::Refresh), Effect::None);
    }

    #[test]
    fn test_navigation_ignored_while_loading() {
        let mut session = session_at_board();
        update(&mut session, Action::Refresh);
        assert_eq!(update(&mut session, Action::SelectThread("100".to_string())), Effect::None);
        assert_eq!(update(&mut session, Action::SetFilter(Some("a".to_string()))), Effect::None);
        assert_eq!(update(&mut session, Action::EnterInsert), Effect::None);
        assert_eq!(session.pending_ticket(), Some(2));
    }

    #[test]
    fn test_mode_isolation() {
        let mut session = session_at_board();
        update(&mut session, Action::EnterInsert);
        assert_eq!(session.nav().mode(), Mode::Insert);

        assert_eq!(update(&mut session, Action::Back), Effect::None);
        assert_eq!(update(&mut session, Action::SelectThread("100".to_string())), Effect::None);
        assert_eq!(update(&mut session, Action::Refresh), Effect::None);
        assert_eq!(session.nav().level(), Level::Board);
        assert_eq!(session.nav().mode(), Mode::Insert);
    }

    #[test]
    fn test_commit_dispatches_in_normal_mode() {
        let mut session = Session::new();
        update(&mut session, Action::EnterInsert);
        let effect = update(&mut session, Action::CommitInsert("board g".to_string()));

        assert!(matches!(effect, Effect::Fetch(_)));
        assert_eq!(session.nav().mode(), Mode::Normal);
        resolve(&mut session, effect, Ok(Fetched::Catalog(sample_catalog())));
        assert_eq!(session.nav().level(), Level::Board);
        assert_eq!(session.nav().mode(), Mode::Normal);
    }

    #[test]
    fn test_commit_unknown_command_reports() {
        let mut session = session_at_board();
        let before = session.nav().clone();
        update(&mut session, Action::EnterInsert);
        let effect = update(&mut session, Action::CommitInsert("frobnicate".to_string()));

        assert_eq!(effect, Effect::Present);
        assert_eq!(session.nav(), &before);
        assert_eq!(session.notice(), Some("unknown command: frobnicate"));
    }

    #[test]
    fn test_commit_rejected_transition_reports() {
        let mut session = session_at_board();
        let before = session.nav().clone();
        update(&mut session, Action::EnterInsert);
        let effect = update(&mut session, Action::CommitInsert("board v".to_string()));

        assert_eq!(effect, Effect::Present);
        assert_eq!(session.nav(), &before);
        assert!(!session.is_loading());
        assert_eq!(session.notice(), Some("board: not available in a board"));
    }

    #[test]
    fn test_commit_thread_at_index_reports() {
        let mut session = Session::new();
        update(&mut session, Action::EnterInsert);
        let effect = update(&mut session, Action::CommitInsert("thread 100".to_string()));

        assert_eq!(effect, Effect::Present);
        assert_eq!(session.nav().level(), Level::Index);
        assert_eq!(session.notice(), Some("thread: not available in the board index"));
    }

    #[test]
    fn test_insert_actions_ignored_in_normal_mode() {
        let mut session = Session::new();
        assert_eq!(update(&mut session, Action::CommitInsert("board g".to_string())), Effect::None);
        assert_eq!(update(&mut session, Action::CancelInsert), Effect::None);
        assert!(!session.is_loading());
        assert_eq!(session.nav(), &NavigationState::new());
    }

    #[test]
    fn test_commit_blank_line_just_leaves_insert() {
        let mut session = Session::new();
        update(&mut session, Action::EnterInsert);
        assert_eq!(update(&mut session, Action::CommitInsert("  ".to_string())), Effect::Present);
        assert_eq!(session.nav().mode(), Mode::Normal);
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_cancel_insert_discards() {
        let mut session = Session::new();
        update(&mut session, Action::EnterInsert);
        update(&mut session, Action::CancelInsert);
        assert_eq!(session.nav().mode(), Mode::Normal);
        assert_eq!(session.nav().level(), Level::Index);
    }

    #[test]
    fn test_commit_quit_unwinds_to_index() {
        let mut session = session_at_thread();
        update(&mut session, Action::EnterInsert);
        let effect = update(&mut session, Action::CommitInsert("quit".to_string()));
        assert_eq!(effect, Effect::Quit);
        assert_eq!(session.nav(), &NavigationState::new());
    }

    #[test]
    fn test_invalid_filter_leaves_state_equal() {
        let mut session = session_at_board();
        update(&mut session, Action::SetFilter(Some("anime".to_string())));
        let before = session.nav().clone();

        update(&mut session, Action::SetFilter(Some("[unclosed".to_string())));

        assert_eq!(session.nav(), &before);
        assert!(session.notice().unwrap().starts_with("invalid filter '[unclosed'"));
    }

    #[test]
    fn test_filter_at_index_reports() {
        let mut session = Session::new();
        update(&mut session, Action::SetFilter(Some("x".to_string())));
        assert_eq!(session.notice(), Some("filters only apply inside a board"));
    }

    #[test]
    fn test_notice_cleared_by_next_action() {
        let mut session = Session::new();
        update(&mut session, Action::SetFilter(Some("x".to_string())));
        assert!(session.notice().is_some());
        update(&mut session, Action::EnterInsert);
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_reserved_keys_change_nothing() {
        for key in [
            Reserved::Watch,
            Reserved::ExpandWatcher,
            Reserved::SplitView,
            Reserved::DeleteWatched,
        ] {
            let mut session = session_at_thread();
            let before = session.nav().clone();
            assert_eq!(update(&mut session, Action::Reserved(key)), Effect::None);
            assert_eq!(session.nav(), &before);
            assert!(session.notice().is_none());
        }
    }

    #[test]
    fn test_stale_ticket_dropped_after_newer_request() {
        let mut session = session_at_board();
        let first = update(&mut session, Action::Refresh);
        // First back cancels the refresh, second returns to the index
        update(&mut session, Action::Back);
        update(&mut session, Action::Back);
        let second = update(&mut session, Action::SelectBoard("v".to_string()));
        assert!(matches!(second, Effect::Fetch(FetchTicket { ticket: 3, .. })));

        // The cancelled refresh must not land on top of the new request
        assert_eq!(resolve(&mut session, first, Ok(Fetched::Catalog(Vec::new()))), Effect::None);
        assert!(session.is_loading());
    }
}
