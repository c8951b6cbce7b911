use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::ui::layout::{GRID_CELL_HEIGHT, GRID_CELL_WIDTH, grid_columns, grid_scroll};
use crate::ui::theme::Theme;
use crate::ui::view::TermGridView;

pub struct TermGrid<'a> {
    pub title: &'a str,
    pub view: &'a TermGridView,
    pub theme: &'a Theme,
}

impl<'a> TermGrid<'a> {
    pub fn new(title: &'a str, view: &'a TermGridView, theme: &'a Theme) -> Self {
        Self { title, view, theme }
    }
}

impl Widget for TermGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.view.show_empty_state {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    t!("grid.empty").to_string(),
                    Style::default().fg(colors.fg()),
                )),
                Line::from(Span::styled(
                    t!("grid.empty_hint").to_string(),
                    Style::default().fg(colors.muted()),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        let columns = grid_columns(inner.width);
        let visible_rows = (inner.height / GRID_CELL_HEIGHT).max(1) as usize;
        let focused_row = self
            .view
            .items
            .iter()
            .find(|item| item.focused)
            .map(|item| item.index / columns)
            .unwrap_or(0);
        let first_row = grid_scroll(focused_row, visible_rows);
        let cell_width = (inner.width / columns as u16).min(GRID_CELL_WIDTH * 2);

        for item in &self.view.items {
            let row = item.index / columns;
            if row < first_row || row >= first_row + visible_rows {
                continue;
            }
            let col = (item.index % columns) as u16;
            let y = inner.y + (row - first_row) as u16 * GRID_CELL_HEIGHT;
            let height = GRID_CELL_HEIGHT.min(inner.bottom().saturating_sub(y));
            let cell = Rect::new(inner.x + col * cell_width, y, cell_width, height);

            let border = if item.focused {
                colors.border_focused()
            } else {
                colors.border()
            };
            let cell_block = Block::bordered()
                .title(format!(" {} ", item.index + 1))
                .border_style(Style::default().fg(border));
            let cell_inner = cell_block.inner(cell);
            cell_block.render(cell, buf);

            let label_style = if item.focused {
                Style::default()
                    .fg(colors.border_focused())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
            };
            // Cards imported from older data can lack an image
            let thumb = match &item.image {
                Some(label) => Span::styled(format!("▣ {label}"), Style::default().fg(colors.muted())),
                None => Span::styled("□", Style::default().fg(colors.warning())),
            };
            Paragraph::new(vec![
                Line::from(Span::styled(item.label.clone(), label_style)),
                Line::from(thumb),
            ])
            .render(cell_inner, buf);
        }
    }
}
