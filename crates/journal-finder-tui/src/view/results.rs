use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use journal_finder_core::{Journal, SearchPhase};

use super::{spinner_char, truncate};
use crate::app::{App, Focus};
use crate::theme::Theme;

/// Rows per result card.
pub const CARD_HEIGHT: u16 = 3;

/// One card: name, publisher line, spacer.
fn card(journal: &Journal, width: usize, theme: &Theme) -> ListItem<'static> {
    let rank = format!("#{} ", journal.id);
    let name = truncate(&journal.name, width.saturating_sub(rank.len() + 1));
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(rank, Style::default().fg(theme.accent)),
            Span::styled(
                name,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   Publisher: ", Style::default().fg(theme.dim)),
            Span::styled(journal.publisher.clone(), Style::default().fg(theme.text)),
        ]),
        Line::from(""),
    ])
}

/// Render the result cards, or the loading / empty placeholder.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    app.last_results_area = Some(area);
    let focused = app.focus == Focus::Results;
    let theme = &app.theme;

    let title = match app.search.phase() {
        SearchPhase::Resolved { count } if *count > 0 => format!(" Journals ({count}) "),
        _ => " Journals ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(title);

    if app.results.is_empty() {
        let placeholder = match app.search.phase() {
            SearchPhase::Loading => Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_char(app.tick)),
                    Style::default().fg(theme.spinner),
                ),
                Span::styled("Finding journals\u{2026}", Style::default().fg(theme.text)),
            ]),
            SearchPhase::Idle => Line::from(Span::styled(
                "Press r to find journals for your abstract",
                Style::default().fg(theme.dim),
            )),
            SearchPhase::Resolved { .. } | SearchPhase::Failed(_) => Line::from(Span::styled(
                "No journals found",
                Style::default().fg(theme.dim),
            )),
        };
        f.render_widget(
            Paragraph::new(vec![Line::from(""), placeholder.centered()]).block(block),
            area,
        );
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .results
        .journals()
        .iter()
        .map(|j| card(j, width, theme))
        .collect();

    let highlight = if focused {
        theme.highlight_style()
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    f.render_stateful_widget(list, area, &mut app.results_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_height_matches_click_mapping() {
        let journal = Journal {
            id: 1,
            name: "Nature".into(),
            jif: 50.0,
            category: String::new(),
            keywords: vec![],
            publisher: "Springer Nature".into(),
            decision_time: 7,
        };
        assert_eq!(card(&journal, 40, &Theme::blue()).height(), CARD_HEIGHT as usize);
    }
}
