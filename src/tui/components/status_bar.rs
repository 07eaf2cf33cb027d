//! # StatusBar Component
//!
//! One line above the command bar:
//!
//! ```text
//! Mode: Normal, Board: /g/ | Filter: anime | Parsed 1 items in 0.0004s | <notice>
//! ```
//!
//! The build duration is a prop rather than part of the tree so that rebuilding
//! the same state always yields the same tree.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::view::FooterNode;
use crate::tui::component::Component;

pub struct StatusBar<'a> {
    pub footer: &'a FooterNode,
    pub build_secs: f64,
}

impl<'a> StatusBar<'a> {
    pub fn new(footer: &'a FooterNode, build_secs: f64) -> Self {
        Self { footer, build_secs }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let dim = Style::default().add_modifier(Modifier::DIM);
        let mut spans = vec![Span::raw(format!(
            "Mode: {}, Board: {}",
            self.footer.mode.label(),
            self.footer.board
        ))];
        if let Some(filter) = &self.footer.filter {
            spans.push(Span::styled(" | ", dim));
            spans.push(Span::styled(
                format!("Filter: {filter}"),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.push(Span::styled(" | ", dim));
        spans.push(Span::raw(format!(
            "Parsed {} items in {:.4}s",
            self.footer.item_count, self.build_secs
        )));
        if let Some(notice) = &self.footer.notice {
            spans.push(Span::styled(" | ", dim));
            spans.push(Span::styled(
                notice.clone(),
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            ));
        }
        spans
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(Line::from(self.spans())), area);
    }
}
