use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::ui::components::button;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::view::LearningCardView;

/// Full-screen overlay showing one card at a time.
pub struct LearningCard<'a> {
    pub view: &'a LearningCardView,
    pub theme: &'a Theme,
}

impl<'a> LearningCard<'a> {
    pub fn new(view: &'a LearningCardView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }
}

impl Widget for LearningCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let view = self.view;

        let popup = centered_rect(70, 80, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {} ", t!("learning.title")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            view.counter.clone(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Right)
        .render(layout[0], buf);

        let image_block = Block::bordered().border_style(Style::default().fg(colors.border()));
        let image_inner = image_block.inner(layout[1]);
        image_block.render(layout[1], buf);
        let image_lines = match &view.image {
            Some(label) => vec![
                Line::from(Span::styled("▣", Style::default().fg(colors.accent()))),
                Line::from(Span::styled(label.clone(), Style::default().fg(colors.muted()))),
            ],
            None => Vec::new(),
        };
        let image_top = image_inner.height.saturating_sub(image_lines.len() as u16) / 2;
        Paragraph::new(image_lines)
            .alignment(Alignment::Center)
            .render(
                Rect {
                    y: image_inner.y + image_top,
                    height: image_inner.height.saturating_sub(image_top),
                    ..image_inner
                },
                buf,
            );

        let term_line = if view.empty {
            Line::from(Span::styled(
                t!("learning.empty").to_string(),
                Style::default().fg(colors.muted()),
            ))
        } else {
            match &view.term {
                Some(term) => Line::from(Span::styled(
                    term.clone(),
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                )),
                None => Line::from(Span::styled("· · ·", Style::default().fg(colors.muted()))),
            }
        };
        Paragraph::new(vec![Line::from(""), term_line])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout[2], buf);

        let toggle_label = if view.term_shown {
            t!("learning.hide_term")
        } else {
            t!("learning.show_term")
        };
        let buttons = Line::from(vec![
            button(&t!("learning.prev"), view.prev, colors),
            Span::raw("  "),
            button(&toggle_label, view.toggle, colors),
            Span::raw("  "),
            button(&t!("learning.next"), view.next, colors),
            Span::raw("  "),
            button(&t!("learning.close"), view.close, colors),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(layout[3], buf);
    }
}
