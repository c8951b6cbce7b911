use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::app::Notice;
use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;

pub struct NoticeDialog<'a> {
    pub notice: &'a Notice,
    pub theme: &'a Theme,
}

impl<'a> NoticeDialog<'a> {
    pub fn new(notice: &'a Notice, theme: &'a Theme) -> Self {
        Self { notice, theme }
    }
}

impl Widget for NoticeDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let message = self.notice.message();

        let width = area.width.min(60);
        let text_width = width.saturating_sub(4) as usize;
        let height = (wrapped_line_count(&message, text_width) as u16 + 4).min(area.height);
        let dialog = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );
        Clear.render(dialog, buf);

        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", self.notice.title()),
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(colors.error()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(dialog);
        block.render(dialog, buf);

        let mut lines: Vec<Line> = message
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(colors.fg()))))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            t!("notice.dismiss").to_string(),
            Style::default().fg(colors.muted()),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
