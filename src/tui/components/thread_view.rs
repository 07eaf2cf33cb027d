//! # ThreadView Component
//!
//! Scrollable list of posts. Each post is a bordered block whose title carries
//! the post number, author and time; the body holds the subject, the attached
//! filename and the comment.
//!
//! Comment lines are wrapped up front with `textwrap`, so a post's height is
//! known before anything is drawn and the `ScrollView` canvas can be sized
//! exactly. The selected post is always scrolled fully into view (or its top
//! edge, if it is taller than the viewport).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::view::{LineKind, PostNode};
use crate::tui::component::Component;

/// Top + bottom borders
const VERTICAL_OVERHEAD: u16 = 2;
/// Left + right borders
const HORIZONTAL_OVERHEAD: u16 = 2;

fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Plain => Style::default(),
        LineKind::QuoteLink => Style::default().fg(Color::LightCyan),
        LineKind::Greentext => Style::default().fg(Color::Green),
    }
}

/// A post laid out for a given width.
struct RenderedPost<'a> {
    title: String,
    lines: Vec<Line<'a>>,
    height: u16,
}

impl<'a> RenderedPost<'a> {
    fn new(post: &'a PostNode, content_width: u16) -> Self {
        let inner = content_width.saturating_sub(HORIZONTAL_OVERHEAD).max(1) as usize;
        let mut lines = Vec::new();

        if let Some(subject) = &post.subject {
            lines.push(Line::styled(
                subject.as_str(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(file) = &post.attachment {
            lines.push(Line::styled(
                format!("File: {file}"),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        for comment in &post.lines {
            let style = line_style(comment.kind);
            let wrapped = textwrap::wrap(&comment.text, inner);
            if wrapped.is_empty() {
                lines.push(Line::raw(""));
            }
            for piece in wrapped {
                lines.push(Line::from(Span::styled(piece.into_owned(), style)));
            }
        }

        let mut title = format!(" No.{} {} ", post.number, post.author);
        if let Some(at) = post.posted_at {
            title.push_str(&format!("{} ", at.format("%Y-%m-%d %H:%M")));
        }

        let height = lines.len().max(1) as u16 + VERTICAL_OVERHEAD;
        Self {
            title,
            lines,
            height,
        }
    }

    fn paragraph(&self, selected: bool) -> Paragraph<'a> {
        let border_style = if selected {
            Style::default().fg(Color::LightCyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        Paragraph::new(self.lines.clone()).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(self.title.clone()),
        )
    }
}

/// Scroll offset for a viewport of `viewport` rows that keeps the item spanning
/// `top..bottom` visible, starting from `current`.
pub fn offset_to_show(current: u16, top: u16, bottom: u16, viewport: u16) -> u16 {
    if top < current || bottom - top >= viewport {
        top
    } else if bottom > current + viewport {
        bottom - viewport
    } else {
        current
    }
}

/// Created fresh each frame around the persistent scroll state.
pub struct ThreadView<'a> {
    pub state: &'a mut ScrollViewState,
    pub posts: &'a [PostNode],
    pub selected: Option<usize>,
}

impl<'a> ThreadView<'a> {
    pub fn new(state: &'a mut ScrollViewState, posts: &'a [PostNode], selected: Option<usize>) -> Self {
        Self {
            state,
            posts,
            selected,
        }
    }
}

impl Component for ThreadView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column
        let rendered: Vec<RenderedPost> = self
            .posts
            .iter()
            .map(|p| RenderedPost::new(p, content_width))
            .collect();
        let total_height: u16 = rendered.iter().map(|r| r.height).sum();

        if let Some(index) = self.selected.filter(|i| *i < rendered.len()) {
            let top: u16 = rendered[..index].iter().map(|r| r.height).sum();
            let bottom = top + rendered[index].height;
            let current = self.state.offset().y;
            let y = offset_to_show(current, top, bottom, area.height);
            self.state.set_offset(Position { x: 0, y });
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for (i, post) in rendered.iter().enumerate() {
            let rect = Rect::new(0, y, content_width, post.height);
            scroll_view.render_widget(post.paragraph(self.selected == Some(i)), rect);
            y += post.height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut *self.state);
    }
}
