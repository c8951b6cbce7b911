pub mod category_menu;
pub mod learning_card;
pub mod manage_modal;
pub mod notice;
pub mod term_grid;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use rust_i18n::t;

use crate::focus::FocusTarget;
use crate::ui::line_input::LineInput;
use crate::ui::theme::ThemeColors;
use crate::ui::view::ControlState;

/// `[ label ]`, highlighted when focused and dimmed when disabled.
pub fn button(label: &str, state: ControlState, colors: &ThemeColors) -> Span<'static> {
    let style = if state.disabled {
        Style::default().fg(colors.disabled())
    } else if state.focused {
        Style::default()
            .fg(colors.selected_fg())
            .bg(colors.selected_bg())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.accent())
    };
    Span::styled(format!("[ {label} ]"), style)
}

/// Text field with a block cursor while focused.
pub fn input_line(label: &str, input: &LineInput, focused: bool, colors: &ThemeColors) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(colors.border_focused())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.fg())
    };
    let text_style = Style::default().fg(colors.fg()).bg(colors.accent_dim());
    let cursor_style = Style::default().fg(colors.selected_fg()).bg(colors.border_focused());

    let mut spans = vec![Span::styled(format!("{label} "), label_style)];
    if focused {
        let (before, at, after) = input.render_parts();
        spans.push(Span::styled(before.to_string(), text_style));
        spans.push(Span::styled(at.unwrap_or(' ').to_string(), cursor_style));
        spans.push(Span::styled(after.to_string(), text_style));
    } else {
        spans.push(Span::styled(format!("{} ", input.value()), text_style));
    }
    Line::from(spans)
}

/// Back and manage buttons above the term grid.
pub fn category_controls(focus: Option<&FocusTarget>, colors: &ThemeColors) -> Line<'static> {
    let control = |target: FocusTarget| ControlState {
        disabled: false,
        focused: focus == Some(&target),
    };
    Line::from(vec![
        button(&t!("category.back"), control(FocusTarget::BackButton), colors),
        Span::raw("  "),
        button(&t!("category.manage"), control(FocusTarget::ManageButton), colors),
    ])
}
