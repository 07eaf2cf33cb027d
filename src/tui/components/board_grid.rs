//! # BoardGrid Component
//!
//! The index: every known board as a fixed-width tile, laid out left to right
//! and wrapped to the available width. The selected tile is highlighted and
//! kept on screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::view::BoardTile;
use crate::tui::component::Component;

/// Columns per tile, label included.
const TILE_WIDTH: u16 = 8;

pub struct BoardGrid<'a> {
    pub tiles: &'a [BoardTile],
    pub selected: Option<usize>,
}

impl<'a> BoardGrid<'a> {
    pub fn new(tiles: &'a [BoardTile], selected: Option<usize>) -> Self {
        Self { tiles, selected }
    }

    /// Tiles per row for a given inner width.
    pub fn columns(inner_width: u16) -> usize {
        (inner_width / TILE_WIDTH).max(1) as usize
    }

    fn tile_span(&self, index: usize, tile: &BoardTile) -> Span<'static> {
        let text = format!("{:<width$}", tile.label, width = TILE_WIDTH as usize);
        if self.selected == Some(index) {
            Span::styled(
                text,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(text, Style::default().fg(Color::LightCyan))
        }
    }
}

impl Component for BoardGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Boards")
            .border_style(Style::default().add_modifier(Modifier::DIM));
        let inner = block.inner(area);
        let columns = Self::columns(inner.width);

        let rows: Vec<Line> = self
            .tiles
            .chunks(columns)
            .enumerate()
            .map(|(row, chunk)| {
                Line::from(
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(col, tile)| self.tile_span(row * columns + col, tile))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let selected_row = self.selected.unwrap_or(0) / columns;
        let first_row = selected_row.saturating_sub(inner.height.saturating_sub(1) as usize);

        let paragraph = Paragraph::new(rows)
            .block(block)
            .scroll((first_row as u16, 0));
        frame.render_widget(paragraph, area);
    }
}
