use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::centered_rect;
use crate::theme::Theme;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(64, 32, f.area());

    let lines = vec![
        Line::from(Span::styled(" Keyboard Shortcuts ", theme.header_style())),
        Line::from(""),
        section_header("Navigation", theme),
        key_line("Tab", "Cycle focus: filters, abstract, results", theme),
        key_line("j / \u{2193}", "Move down", theme),
        key_line("k / \u{2191}", "Move up", theme),
        key_line("[", "Show / hide the filter sidebar", theme),
        key_line("Esc", "Back / close details", theme),
        Line::from(""),
        section_header("Filters", theme),
        key_line("h / l", "Adjust slider (0.1 or 1 day)", theme),
        key_line("H / L", "Adjust slider by ten steps", theme),
        key_line("Enter", "Pick model / search publishers", theme),
        key_line("x", "Remove selected publisher", theme),
        key_line("Ctrl+s", "Save filters as defaults", theme),
        Line::from(""),
        section_header("Abstract", theme),
        key_line("Enter", "Start editing", theme),
        key_line("Esc", "Stop editing", theme),
        Line::from(""),
        section_header("Search", theme),
        key_line("r / F5", "Find journals", theme),
        key_line("Ctrl+r", "Find journals (also while editing)", theme),
        key_line("Enter", "Open journal details", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Quit (any mode)", theme),
        Line::from(""),
        section_header("Mouse", theme),
        key_line("Click", "Focus pane / open journal / close details", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("    {key:<12}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}
