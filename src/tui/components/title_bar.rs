//! # TitleBar Component
//!
//! Top line of the screen: application title and the current location.
//!
//! ```text
//!  CommandChan | /g/ › 123456
//! ```
//!
//! Stateless: all data comes from the tree's `HeaderNode`. The whole line is
//! painted white on dark red.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::view::HeaderNode;
use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub header: &'a HeaderNode,
}

impl<'a> TitleBar<'a> {
    pub fn new(header: &'a HeaderNode) -> Self {
        Self { header }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(Color::White).bg(Color::Red);
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.header.title),
                style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("| {}", self.header.location), style),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
