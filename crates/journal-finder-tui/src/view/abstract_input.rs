use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{App, EditTarget, Focus};

const CURSOR: char = '\u{258F}';

/// Rows `line` occupies when word-wrapped to `width` columns.
fn wrapped_rows(line: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let mut rows = 1;
    let mut col = 0;
    for word in line.split_inclusive(' ') {
        let visible = word.trim_end_matches(' ').chars().count();
        if col > 0 && col + visible > width {
            rows += 1;
            col = 0;
        }
        col += visible;
        // Words longer than a row are broken mid-word.
        if col > width {
            rows += (col - 1) / width;
            col = (col - 1) % width + 1;
        }
        col += word.chars().count() - visible;
    }
    rows
}

/// Zero-based display row of the end of `before_cursor`.
fn cursor_row(before_cursor: &str, width: usize) -> usize {
    before_cursor
        .split('\n')
        .map(|line| wrapped_rows(line, width))
        .sum::<usize>()
        - 1
}

/// Render the abstract editor.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    app.last_abstract_area = Some(area);
    let theme = &app.theme;
    let focused = app.focus == Focus::Abstract;
    let editing = app.editing == Some(EditTarget::Abstract);
    let input = &app.abstract_input;

    let lines: Vec<Line> = if input.text().is_empty() && !editing {
        vec![Line::from(Span::styled(
            "Paste or type your paper's abstract (Enter to edit)",
            Style::default().fg(theme.dim),
        ))]
    } else {
        let mut shown = input.text().to_string();
        if editing {
            shown.insert(input.cursor(), CURSOR);
        }
        shown
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.text))))
            .collect()
    };

    // Keep the cursor row in view, counting soft-wrapped rows.
    let inner_width = area.width.saturating_sub(2) as usize;
    let mut before_cursor = input.text()[..input.cursor()].to_string();
    if editing {
        before_cursor.push(CURSOR);
    }
    let row = cursor_row(&before_cursor, inner_width);
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = row.saturating_sub(inner_height.saturating_sub(1)) as u16;

    let title = if editing {
        " Abstract (editing) "
    } else {
        " Abstract "
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(focused || editing))
                .title(title)
                .title_bottom(Line::from(Span::styled(
                    format!(" {} words ", input.text().split_whitespace().count()),
                    Style::default().fg(theme.dim),
                ))),
        );
    f.render_widget(paragraph, area);
}
