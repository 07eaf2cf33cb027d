//! # Loading Component
//!
//! Shown in place of the body while a fetch is in flight. The previous body is
//! gone; header and footer still describe where the user is.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub struct Loading<'a> {
    pub target: &'a str,
    pub frame_index: usize,
}

impl<'a> Loading<'a> {
    pub fn new(target: &'a str, frame_index: usize) -> Self {
        Self {
            target,
            frame_index,
        }
    }
}

impl Component for Loading<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER[self.frame_index % SPINNER.len()];
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{spinner} "),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("Loading {}", self.target)),
            ]),
            Line::styled("q to cancel", Style::default().fg(Color::DarkGray)),
        ];

        let [middle] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), middle);
    }
}
