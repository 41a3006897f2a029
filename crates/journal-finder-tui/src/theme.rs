use ratatui::style::{Color, Modifier, Style};

use journal_finder_core::SearchPhase;

/// Color theme for the TUI.
pub struct Theme {
    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub accent: Color,
    pub chip_fg: Color,
    pub chip_bg: Color,
    pub spinner: Color,
    pub error: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Blue accents on the terminal's own background.
    pub fn blue() -> Self {
        Self {
            header_fg: Color::White,
            header_bg: Color::Rgb(37, 99, 235),
            border: Color::Rgb(80, 80, 90),
            border_focused: Color::Rgb(37, 99, 235),
            text: Color::White,
            dim: Color::Rgb(130, 130, 145),
            highlight_bg: Color::Rgb(30, 45, 90),
            active: Color::Rgb(96, 150, 255),
            accent: Color::Rgb(29, 78, 216),
            chip_fg: Color::White,
            chip_bg: Color::Rgb(37, 99, 235),
            spinner: Color::Rgb(37, 99, 235),
            error: Color::Rgb(255, 90, 90),
            footer_fg: Color::Rgb(130, 130, 145),
            footer_bg: Color::Reset,
        }
    }

    /// No colors beyond reverse video, for limited terminals.
    pub fn mono() -> Self {
        Self {
            header_fg: Color::Black,
            header_bg: Color::White,
            border: Color::DarkGray,
            border_focused: Color::White,
            text: Color::Reset,
            dim: Color::DarkGray,
            highlight_bg: Color::DarkGray,
            active: Color::White,
            accent: Color::White,
            chip_fg: Color::Black,
            chip_bg: Color::White,
            spinner: Color::White,
            error: Color::White,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Look up a theme by config name; unknown names fall back to `blue`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "mono" => Self::mono(),
            _ => Self::blue(),
        }
    }

    pub fn phase_color(&self, phase: &SearchPhase) -> Color {
        match phase {
            SearchPhase::Idle => self.dim,
            SearchPhase::Loading => self.spinner,
            SearchPhase::Resolved { .. } => self.text,
            SearchPhase::Failed(_) => self.dim,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn chip_style(&self) -> Style {
        Style::default().fg(self.chip_fg).bg(self.chip_bg)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
