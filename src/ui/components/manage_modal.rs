use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use rust_i18n::t;

use crate::app::ManageModal;
use crate::focus::FocusTarget;
use crate::ui::components::{button, input_line};
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::view::{ControlState, ManageListView};

/// Add/delete panel for the cards of one category.
pub struct ManagePanel<'a> {
    pub category: &'a str,
    pub form: &'a ManageModal,
    pub list: &'a ManageListView,
    pub focus: Option<&'a FocusTarget>,
    pub theme: &'a Theme,
}

impl<'a> ManagePanel<'a> {
    pub fn new(
        category: &'a str,
        form: &'a ManageModal,
        list: &'a ManageListView,
        focus: Option<&'a FocusTarget>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            category,
            form,
            list,
            focus,
            theme,
        }
    }

    fn control(&self, target: FocusTarget, disabled: bool) -> ControlState {
        ControlState {
            disabled,
            focused: self.focus == Some(&target),
        }
    }
}

impl Widget for ManagePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let popup = centered_rect(70, 85, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {} ", t!("manage.title", category = self.category)))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        let close = self.control(FocusTarget::CloseManage, false);
        Paragraph::new(Line::from(button(&t!("manage.close"), close, colors)))
            .alignment(ratatui::layout::Alignment::Right)
            .render(layout[0], buf);

        input_line(
            &t!("manage.term_label"),
            &self.form.term,
            self.focus == Some(&FocusTarget::TermInput),
            colors,
        )
        .render(layout[2], buf);
        input_line(
            &t!("manage.image_label"),
            &self.form.image_path,
            self.focus == Some(&FocusTarget::ImageInput),
            colors,
        )
        .render(layout[3], buf);

        let submit_label = if self.form.submitting {
            t!("manage.submitting")
        } else {
            t!("manage.submit")
        };
        let submit = self.control(FocusTarget::SubmitButton, self.form.submitting);
        Line::from(button(&submit_label, submit, colors)).render(layout[4], buf);

        Line::from(vec![
            Span::styled(
                t!("manage.count_label").to_string(),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                format!(" {}", self.list.count),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ])
        .render(layout[6], buf);

        let list_area = layout[7];
        if self.list.show_placeholder {
            Line::from(Span::styled(
                t!("manage.placeholder").to_string(),
                Style::default().fg(colors.muted()),
            ))
            .render(list_area, buf);
            return;
        }

        let visible = list_area.height as usize;
        let focused_row = self
            .list
            .rows
            .iter()
            .position(|row| row.delete_focused)
            .unwrap_or(0);
        let skip = (focused_row + 1).saturating_sub(visible);
        let delete_label = t!("manage.delete");

        for (offset, row) in self.list.rows.iter().skip(skip).take(visible).enumerate() {
            let thumb = match &row.thumbnail {
                Some(label) => format!("▣ {label:<12}"),
                None => format!("□ {:<12}", ""),
            };
            let state = ControlState {
                disabled: false,
                focused: row.delete_focused,
            };
            let line = Line::from(vec![
                Span::styled(thumb, Style::default().fg(colors.muted())),
                Span::raw(" "),
                Span::styled(row.label.clone(), Style::default().fg(colors.fg())),
                Span::raw("  "),
                button(&delete_label, state, colors),
            ]);
            let y = list_area.y + offset as u16;
            line.render(Rect::new(list_area.x, y, list_area.width, 1), buf);
        }
    }
}
