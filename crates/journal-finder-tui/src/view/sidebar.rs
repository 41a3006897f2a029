use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use journal_finder_core::filter::{
    DECISION_TIME_MAX, DECISION_TIME_MIN, IMPACT_FACTOR_MAX, IMPACT_FACTOR_MIN,
};

use crate::app::{App, EditTarget, Focus};
use crate::model::sidebar::SidebarItem;

const SLIDER_WIDTH: usize = 20;

/// Text slider such as `━━━━━━●──────────`, `frac` in `0..=1`.
fn slider_bar(frac: f64, width: usize) -> String {
    let filled = ((frac.clamp(0.0, 1.0)) * (width.saturating_sub(1)) as f64).round() as usize;
    let mut bar = "\u{2501}".repeat(filled);
    bar.push('\u{25CF}');
    bar.push_str(&"\u{2500}".repeat(width.saturating_sub(filled + 1)));
    bar
}

/// Render the filter sidebar: model picker, sliders, publishers and search button.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    app.last_sidebar_area = Some(area);
    let focused = app.focus == Focus::Sidebar;
    let current = app.sidebar.current(&app.filters);
    let theme = &app.theme;
    let filters = &app.filters;

    let dim = Style::default().fg(theme.dim);
    let heading = Style::default()
        .fg(theme.active)
        .add_modifier(Modifier::BOLD);
    let row_style = |item: &SidebarItem| {
        if focused && *item == current {
            theme.highlight_style()
        } else {
            Style::default().fg(theme.text)
        }
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;

    lines.push(Line::from(Span::styled(" LLM Model", heading)));
    for item in SidebarItem::all(filters) {
        if item == current {
            cursor_line = lines.len();
        }
        match &item {
            SidebarItem::Model(model) => {
                let mark = if filters.llm_model() == *model {
                    "(\u{25CF})"
                } else {
                    "( )"
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {mark} {}", model.label()), row_style(&item)),
                    Span::styled(format!("  {}", model.description()), dim),
                ]));
            }
            SidebarItem::ImpactFactor => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(" Impact Factor", heading)));
                if item == current {
                    cursor_line = lines.len();
                }
                let frac = (filters.impact_factor() - IMPACT_FACTOR_MIN)
                    / (IMPACT_FACTOR_MAX - IMPACT_FACTOR_MIN);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  \u{2265} {:>4.1} ", filters.impact_factor()),
                        row_style(&item),
                    ),
                    Span::styled(slider_bar(frac, SLIDER_WIDTH), Style::default().fg(theme.accent)),
                ]));
            }
            SidebarItem::DecisionTime => {
                lines.push(Line::from(Span::styled(" First Decision", heading)));
                if item == current {
                    cursor_line = lines.len();
                }
                let frac = (filters.decision_time().saturating_sub(DECISION_TIME_MIN)) as f64
                    / (DECISION_TIME_MAX - DECISION_TIME_MIN) as f64;
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  \u{2264} {:>2} days ", filters.decision_time()),
                        row_style(&item),
                    ),
                    Span::styled(slider_bar(frac, SLIDER_WIDTH), Style::default().fg(theme.accent)),
                ]));
            }
            SidebarItem::PublisherSearch => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(" Publishers", heading)));
                if item == current {
                    cursor_line = lines.len();
                }
                let editing = app.editing == Some(EditTarget::PublisherSearch);
                let buffer = filters.publisher_search();
                let shown = if buffer.is_empty() && !editing {
                    Span::styled("type a publisher\u{2026}", dim)
                } else if editing {
                    Span::styled(format!("{buffer}\u{258F}"), Style::default().fg(theme.text))
                } else {
                    Span::styled(buffer.to_string(), Style::default().fg(theme.text))
                };
                lines.push(Line::from(vec![
                    Span::styled("  Search: ", row_style(&item)),
                    shown,
                ]));
                if editing {
                    for (i, name) in filters.matching_publishers().iter().enumerate() {
                        let style = if i == app.sidebar.suggestion_cursor {
                            theme.highlight_style()
                        } else {
                            dim
                        };
                        lines.push(Line::from(Span::styled(format!("     {name}"), style)));
                    }
                }
            }
            SidebarItem::Publisher(name) => {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!(" {name} \u{00D7} "), theme.chip_style()),
                    Span::styled(
                        if focused && item == current { " x:remove" } else { "" },
                        dim,
                    ),
                ]));
            }
            SidebarItem::FindJournals => {
                lines.push(Line::from(""));
                if item == current {
                    cursor_line = lines.len();
                }
                let style = if app.search.is_loading() {
                    dim
                } else if focused && item == current {
                    theme.header_style()
                } else {
                    Style::default()
                        .fg(theme.active)
                        .add_modifier(Modifier::BOLD)
                };
                lines.push(Line::from(Span::styled("  [ Find Journals ]", style)));
            }
        }
    }

    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = cursor_line.saturating_sub(inner_height.saturating_sub(1)) as u16;

    let paragraph = Paragraph::new(lines).scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused))
            .title(" Filters "),
    );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_marks_ends() {
        assert!(slider_bar(0.0, 10).starts_with('\u{25CF}'));
        assert!(slider_bar(1.0, 10).ends_with('\u{25CF}'));
        assert_eq!(slider_bar(0.5, 10).chars().count(), 10);
    }
}
