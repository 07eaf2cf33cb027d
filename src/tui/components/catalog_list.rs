//! # CatalogList Component
//!
//! A board's threads, one per row, in the order the provider returned them.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState};

use crate::core::view::CatalogCard;
use crate::tui::component::Component;

pub struct CatalogList<'a> {
    pub cards: &'a [CatalogCard],
    pub selected: Option<usize>,
    /// Board label shown in the border title
    pub board: &'a str,
}

impl<'a> CatalogList<'a> {
    pub fn new(cards: &'a [CatalogCard], selected: Option<usize>, board: &'a str) -> Self {
        Self {
            cards,
            selected,
            board,
        }
    }
}

fn card_line(card: &CatalogCard) -> Line<'_> {
    Line::from(vec![
        Span::styled(
            format!("No.{:<10}", card.thread_id),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled(
            format!("R: {:>4} / I: {:>4}  ", card.reply_count, card.image_count),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(card.title.as_str()),
    ])
}

impl Component for CatalogList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!("{} catalog ({} threads)", self.board, self.cards.len()))
            .border_style(Style::default().add_modifier(Modifier::DIM));

        if self.cards.is_empty() {
            let empty = ratatui::widgets::Paragraph::new("No threads match.").block(block);
            frame.render_widget(empty, area);
            return;
        }

        let list = List::new(self.cards.iter().map(|c| ListItem::new(card_line(c))))
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(self.selected);
        frame.render_stateful_widget(list, area, &mut state);
    }
}
