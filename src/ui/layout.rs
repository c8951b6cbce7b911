use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of one term grid cell, borders included.
pub const GRID_CELL_WIDTH: u16 = 24;
/// Height of one term grid cell, borders included.
pub const GRID_CELL_HEIGHT: u16 = 4;

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

pub fn grid_columns(width: u16) -> usize {
    (width / GRID_CELL_WIDTH).max(1) as usize
}

/// First grid row to draw so that `focused_row` stays on screen.
pub fn grid_scroll(focused_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return focused_row;
    }
    (focused_row + 1).saturating_sub(visible_rows)
}

pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    text.lines()
        .map(|line| line.chars().count().max(1).div_ceil(width))
        .sum::<usize>()
        .max(1)
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if current.is_empty() {
            format!(" {hint}")
        } else {
            format!("{current}  {hint}")
        };
        if candidate.chars().count() <= width || current.is_empty() {
            current = candidate;
        } else {
            out.push(std::mem::take(&mut current));
            current = format!(" {hint}");
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 10;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_columns_never_zero() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(23), 1);
        assert_eq!(grid_columns(96), 4);
    }

    #[test]
    fn grid_scroll_keeps_focus_visible() {
        assert_eq!(grid_scroll(0, 3), 0);
        assert_eq!(grid_scroll(2, 3), 0);
        assert_eq!(grid_scroll(5, 3), 3);
    }

    #[test]
    fn hints_wrap_to_width() {
        let lines = pack_hint_lines(&["[Tab] Next", "[Enter] Open", "[Esc] Back"], 26);
        assert_eq!(lines, vec![" [Tab] Next  [Enter] Open", " [Esc] Back"]);
        assert!(pack_hint_lines(&["x"], 0).is_empty());
    }

    #[test]
    fn centered_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup, area);
    }

    #[test]
    fn wrapped_lines_count_each_paragraph() {
        assert_eq!(wrapped_line_count("abcd\nab", 2), 3);
        assert_eq!(wrapped_line_count("", 10), 1);
    }
}
