use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use journal_finder_core::Journal;

use super::centered_rect;
use crate::app::App;
use crate::theme::Theme;

fn field<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {label:<16}"), Style::default().fg(theme.dim)),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}

fn detail_lines<'a>(journal: &Journal, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", journal.name),
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Rank", format!("#{}", journal.id), theme),
        field("Impact factor", journal.jif.to_string(), theme),
        field("Publisher", journal.publisher.clone(), theme),
        field(
            "First decision",
            format!("{} days", journal.decision_time),
            theme,
        ),
    ];
    if !journal.category.is_empty() {
        lines.push(field("Category", journal.category.clone(), theme));
    }
    if !journal.keywords.is_empty() {
        lines.push(field("Keywords", journal.keywords.join(", "), theme));
    }
    lines
}

/// Render the active journal as a modal popup and remember where it landed.
pub fn render(f: &mut Frame, app: &mut App) {
    let Some(journal) = app.results.active() else {
        app.last_detail_area = None;
        return;
    };
    let theme = &app.theme;
    let lines = detail_lines(journal, theme);

    let height = lines.len() as u16 + 4;
    let popup = centered_rect(70, height, f.area());

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" Journal ")
                .title_bottom(Line::from(Span::styled(
                    " Esc/x: close ",
                    Style::default().fg(theme.dim),
                ))),
        );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
    app.last_detail_area = Some(popup);
}
