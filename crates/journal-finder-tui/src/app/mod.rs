mod backend;
mod update;

use chrono::{DateTime, Local};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{ListState, Paragraph};
use tokio::sync::mpsc;

use journal_finder_core::{
    FilterDefaults, FilterState, ResultPresenter, SearchOrchestrator, SearchPhase,
};

use crate::model::abstract_input::AbstractInput;
use crate::model::sidebar::SidebarState;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;
use crate::view::spinner_char;

/// Width of the filter sidebar when open.
const SIDEBAR_WIDTH: u16 = 40;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Abstract,
    Results,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    TextInput,
}

/// Which text field is being edited in `InputMode::TextInput`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Abstract,
    PublisherSearch,
}

/// Main application state.
pub struct App {
    pub theme: Theme,
    pub filters: FilterState,
    pub abstract_input: AbstractInput,
    pub search: SearchOrchestrator,
    pub results: ResultPresenter,

    pub focus: Focus,
    pub input_mode: InputMode,
    pub editing: Option<EditTarget>,
    pub sidebar_open: bool,
    pub sidebar: SidebarState,
    /// Cursor and scroll offset of the result cards.
    pub results_state: ListState,

    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,

    /// Endpoint shown in the title bar.
    pub endpoint: String,
    /// Wall-clock time of the last submitted search.
    pub last_search_at: Option<DateTime<Local>>,
    /// One-shot message shown in the footer (e.g. after saving config).
    pub status_message: Option<(String, bool)>,

    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    /// Last rendered pane areas (for mouse click mapping).
    pub last_sidebar_area: Option<Rect>,
    pub last_abstract_area: Option<Rect>,
    pub last_results_area: Option<Rect>,
    /// Last rendered detail popup (for outside-click dismissal).
    pub last_detail_area: Option<Rect>,
}

impl App {
    pub fn new(theme: Theme, defaults: &FilterDefaults) -> Self {
        Self {
            theme,
            filters: FilterState::from_defaults(defaults),
            abstract_input: AbstractInput::default(),
            search: SearchOrchestrator::new(),
            results: ResultPresenter::new(),
            focus: Focus::Abstract,
            input_mode: InputMode::Normal,
            editing: None,
            sidebar_open: true,
            sidebar: SidebarState::default(),
            results_state: ListState::default(),
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            endpoint: String::new(),
            last_search_at: None,
            status_message: None,
            backend_cmd_tx: None,
            last_sidebar_area: None,
            last_abstract_area: None,
            last_results_area: None,
            last_detail_area: None,
        }
    }

    /// Index of the card under the cursor.
    pub fn results_cursor(&self) -> Option<usize> {
        self.results_state.selected()
    }

    /// Insert pasted text into whichever field is being edited.
    pub fn paste(&mut self, text: &str) {
        match self.editing {
            Some(EditTarget::Abstract) => {
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.abstract_input.insert_str(&normalized);
            }
            Some(EditTarget::PublisherSearch) => {
                let line = text.lines().next().unwrap_or("");
                self.filters.publisher_search_mut().push_str(line);
                self.sidebar.suggestion_cursor = 0;
            }
            None => {}
        }
    }

    fn build_status_line(&self) -> Line<'static> {
        let theme = &self.theme;
        let phase = self.search.phase();
        let label = match phase {
            SearchPhase::Idle => "Ready".to_string(),
            SearchPhase::Loading => format!("{} Searching", spinner_char(self.tick)),
            SearchPhase::Resolved { count } => format!("{count} journals"),
            // Rendered like an empty result; the footer hint points to the log.
            SearchPhase::Failed(_) => "0 journals".to_string(),
        };
        let mut spans = vec![Span::styled(
            format!("{label} "),
            Style::default().fg(theme.phase_color(phase)),
        )];
        if let Some(at) = self.last_search_at {
            spans.push(Span::styled(
                format!("@ {} ", at.format("%H:%M:%S")),
                Style::default().fg(theme.dim),
            ));
        }
        Line::from(spans)
    }

    fn build_footer_right(&self) -> Line<'static> {
        let theme = &self.theme;
        if let Some((msg, is_error)) = &self.status_message {
            let color = if *is_error { theme.error } else { theme.active };
            return Line::from(Span::styled(format!("{msg} "), Style::default().fg(color)))
                .alignment(Alignment::Right);
        }
        if matches!(self.search.phase(), SearchPhase::Failed(_)) {
            return Line::from(Span::styled(
                "last search failed (see log) ",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Right);
        }
        Line::from(Span::styled("?:help ", Style::default().fg(theme.dim)))
            .alignment(Alignment::Right)
    }

    /// Render the whole screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        let rows = Layout::vertical([
            Constraint::Length(1), // title bar
            Constraint::Min(5),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

        // --- Title bar ---
        let mut title = vec![
            Span::styled(" JOURNAL FINDER ", self.theme.header_style()),
            Span::raw(" "),
        ];
        title.extend(self.build_status_line().spans);
        if !self.endpoint.is_empty() {
            title.push(Span::styled(
                crate::view::truncate(&self.endpoint, 60),
                Style::default()
                    .fg(self.theme.dim)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(title)), rows[0]);

        // --- Body: sidebar + main pane ---
        let main_area = if self.sidebar_open {
            let chunks = Layout::horizontal([
                Constraint::Length(SIDEBAR_WIDTH.min(rows[1].width / 2)),
                Constraint::Min(30),
            ])
            .split(rows[1]);
            crate::view::sidebar::render_in(f, self, chunks[0]);
            chunks[1]
        } else {
            self.last_sidebar_area = None;
            rows[1]
        };

        let main = Layout::vertical([Constraint::Length(9), Constraint::Min(4)]).split(main_area);
        crate::view::abstract_input::render_in(f, self, main[0]);
        crate::view::results::render_in(f, self, main[1]);

        // --- Footer ---
        crate::view::render_footer(f, self, rows[2]);
        let footer_right = self.build_footer_right();
        f.render_widget(Paragraph::new(vec![footer_right]), rows[2]);

        // --- Overlays ---
        crate::view::detail::render(f, self);

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
