//! # Core Application Logic
//!
//! This module contains CommandChan's navigation logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • NavigationState      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • view::build()        │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │    Data    │
//!            │  Adapter   │            │  Provider  │
//!            │ (ratatui)  │            │  (reqwest) │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `NavigationState`, the level × mode state machine
//! - [`action`]: `Action`, `Effect`, the `Session` and the `update()` reducer
//! - [`command`]: command bar parsing and the verb table
//! - [`view`]: the `RenderTree` and the pure view builder
//! - [`config`]: settings and their override hierarchy

pub mod action;
pub mod boards;
pub mod command;
pub mod config;
pub mod error;
pub mod state;
pub mod view;
