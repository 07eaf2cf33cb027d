use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::view::{BodyNode, RenderTree};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{BoardGrid, CatalogList, Loading, StatusBar, ThreadView, TitleBar};
use crate::tui::frame::Focus;

/// Paints the presented tree.
///
/// ```text
/// ┌ title bar ────────────────┐  1 line
/// │ body                      │  rest
/// ├ status bar ───────────────┤  1 line
/// └ command bar ──────────────┘  3 lines
/// ```
pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState, build_secs: f64, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1), Length(3)]);
    let [title_area, body_area, status_area, command_area] = layout.areas(frame.area());

    let command_bar = tui.router.command_bar_mut();
    command_bar.focused = tui.frames.focus() == Focus::Footer;

    let Some(tree) = tui.frames.tree() else {
        command_bar.render(frame, command_area);
        return;
    };
    let selected = tui.frames.selection();

    TitleBar::new(&tree.header).render(frame, title_area);
    draw_body(frame, body_area, tree, selected, &mut tui.thread_scroll, spinner_frame);
    StatusBar::new(&tree.footer, build_secs).render(frame, status_area);
    command_bar.render(frame, command_area);
}

fn draw_body(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    tree: &RenderTree,
    selected: Option<usize>,
    thread_scroll: &mut tui_scrollview::ScrollViewState,
    spinner_frame: usize,
) {
    match &tree.body {
        BodyNode::Boards(tiles) => BoardGrid::new(tiles, selected).render(frame, area),
        BodyNode::Catalog(cards) => {
            CatalogList::new(cards, selected, &tree.footer.board).render(frame, area)
        }
        BodyNode::Thread(posts) => ThreadView::new(thread_scroll, posts, selected).render(frame, area),
        BodyNode::Loading { target } => Loading::new(target, spinner_frame).render(frame, area),
    }
}
