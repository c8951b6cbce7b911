use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::theme::Theme;
use crate::ui::view::HomeItem;

/// Home screen: the configured categories with their card counts.
pub struct CategoryMenu<'a> {
    pub items: &'a [HomeItem],
    pub theme: &'a Theme,
}

impl<'a> CategoryMenu<'a> {
    pub fn new(items: &'a [HomeItem], theme: &'a Theme) -> Self {
        Self { items, theme }
    }
}

impl Widget for CategoryMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "flashdeck",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("home.subtitle").to_string(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            if i >= rows.len() {
                break;
            }
            let indicator = if item.selected { ">" } else { " " };
            let shortcut = if i < 9 {
                format!("[{}]", i + 1)
            } else {
                "   ".to_string()
            };
            let label = format!(" {indicator} {shortcut} {}", item.name);
            let count = format!("      {}", t!("home.card_count", count = item.count));

            let label_style = Style::default()
                .fg(if item.selected { colors.accent() } else { colors.fg() })
                .add_modifier(if item.selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            Paragraph::new(vec![
                Line::from(Span::styled(label, label_style)),
                Line::from(Span::styled(count, Style::default().fg(colors.muted()))),
            ])
            .render(rows[i], buf);
        }
    }
}
