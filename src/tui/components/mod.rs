//! # TUI Components
//!
//! Everything that paints a part of the screen.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! Created each frame from borrowed `RenderTree` nodes:
//! - `TitleBar`: header line (title + location)
//! - `StatusBar`: mode, board, filter, build metrics and notices
//! - `BoardGrid`: the index
//! - `CatalogList`: a board's threads
//! - `Loading`: placeholder body while a fetch runs
//!
//! ## Stateful Components
//!
//! - `CommandBar`: line editor, owned by the key router (emits `CommandBarEvent`)
//! - `ThreadView`: scrollable posts, wrapping a persistent `ScrollViewState`
//!
//! Components receive their data as props instead of reaching into the session,
//! which keeps each of them testable against a `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── status_bar.rs
//! ├── command_bar.rs
//! ├── board_grid.rs
//! ├── catalog_list.rs
//! ├── thread_view.rs
//! └── loading.rs
//! ```

mod board_grid;
mod catalog_list;
mod command_bar;
mod loading;
mod status_bar;
mod thread_view;
mod title_bar;

pub use board_grid::BoardGrid;
pub use catalog_list::CatalogList;
pub use command_bar::{CommandBar, CommandBarEvent};
pub use loading::Loading;
pub use status_bar::StatusBar;
pub use thread_view::ThreadView;
pub use title_bar::TitleBar;
