pub mod abstract_input;
pub mod detail;
pub mod help;
pub mod quit_confirm;
pub mod results;
pub mod sidebar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, EditTarget, Focus};

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// Create a centered rectangle of the given width (columns) and height (rows).
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

/// Key hints for the current context, left-aligned in the footer row.
pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = if app.results.active().is_some() {
        " Esc/x:close  click outside:close"
    } else {
        match (app.editing, app.focus) {
            (Some(EditTarget::Abstract), _) => " Esc:done  Enter:newline  Ctrl+r:search",
            (Some(EditTarget::PublisherSearch), _) => {
                " \u{2191}/\u{2193}:suggestion  Enter:add  Esc:done"
            }
            (None, Focus::Sidebar) => {
                " j/k:move  h/l:adjust  Enter:select  x:remove  Tab:focus  r:search  Ctrl+s:save"
            }
            (None, Focus::Abstract) => " Enter:edit  Tab:focus  [:sidebar  r:search  q:quit",
            (None, Focus::Results) => " j/k:move  Enter:details  Tab:focus  r:search  q:quit",
        }
    };
    let footer = Line::from(Span::styled(hints, app.theme.footer_style()));
    f.render_widget(Paragraph::new(footer), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Revue d\u{00e9}", 7), "Revue d\u{00e9}");
        assert_eq!(truncate("Physical Review Letters", 8), "Physica\u{2026}");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn centered_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 20, 6);
        let popup = centered_rect(40, 10, area);
        assert!(popup.width <= 20 && popup.height <= 6);
    }
}
