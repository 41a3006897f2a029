use chrono::Local;
use ratatui::layout::{Position, Rect};

use journal_finder_core::DismissReason;
use journal_finder_core::config_file::{self, ConfigFile};
use journal_finder_core::filter::{clamp_decision_time, step_impact_factor};

use super::{App, EditTarget, Focus, InputMode};
use crate::action::Action;
use crate::model::sidebar::SidebarItem;
use crate::tui_event::BackendCommand;
use crate::view::results::CARD_HEIGHT;

fn contains(area: Option<Rect>, x: u16, y: u16) -> bool {
    area.is_some_and(|r| r.contains(Position::new(x, y)))
}

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        if action == Action::Tick {
            self.tick = self.tick.wrapping_add(1);
            return false;
        }
        if !matches!(action, Action::None | Action::Resize(..)) {
            self.status_message = None;
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack | Action::TextCancel => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return false;
        }

        if self.show_help {
            match action {
                Action::ToggleHelp | Action::NavigateBack => self.show_help = false,
                Action::Quit => {
                    self.show_help = false;
                    self.confirm_quit = true;
                }
                _ => {}
            }
            return false;
        }

        // Expanded journal: only dismissal gets through
        if self.results.interaction_locked() {
            match action {
                Action::NavigateBack => {
                    self.results.dismiss(DismissReason::Cancel);
                }
                Action::DrillIn | Action::Remove => {
                    self.results.dismiss(DismissReason::Close);
                }
                Action::ClickAt(x, y) => {
                    if !contains(self.last_detail_area, x, y) {
                        self.results.dismiss(DismissReason::OutsideClick);
                    }
                }
                Action::Quit => self.confirm_quit = true,
                _ => {}
            }
            return false;
        }

        if self.input_mode == InputMode::TextInput {
            self.handle_text_action(action);
            return false;
        }

        match action {
            Action::Quit => self.confirm_quit = true,
            Action::ToggleHelp => self.show_help = true,
            Action::ToggleSidebar => {
                self.sidebar_open = !self.sidebar_open;
                if !self.sidebar_open && self.focus == Focus::Sidebar {
                    self.focus = Focus::Abstract;
                }
            }
            Action::CycleFocus => self.cycle_focus(),
            Action::NavigateBack => {
                if self.focus != Focus::Abstract {
                    self.focus = Focus::Abstract;
                }
            }
            Action::Submit => self.submit(),
            Action::SaveConfig => self.save_filter_defaults(),
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::Increase => self.adjust_slider(1),
            Action::Decrease => self.adjust_slider(-1),
            Action::IncreaseLarge => self.adjust_slider(10),
            Action::DecreaseLarge => self.adjust_slider(-10),
            Action::DrillIn => self.drill_in(),
            Action::Remove => {
                if self.focus == Focus::Sidebar
                    && let SidebarItem::Publisher(name) = self.sidebar.current(&self.filters)
                {
                    self.filters.remove_publisher(&name);
                }
            }
            Action::ClickAt(x, y) => self.click(x, y),
            _ => {}
        }
        false
    }

    /// Snapshot the filters, clear results and hand a ticket to the backend.
    pub fn submit(&mut self) {
        self.stop_editing();
        let criteria = self.filters.commit();
        self.results.clear();
        self.results_state.select(None);
        let ticket = self.search.begin(self.abstract_input.text(), criteria);
        self.last_search_at = Some(Local::now());
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(BackendCommand::Search(ticket));
        }
    }

    fn start_editing(&mut self, target: EditTarget) {
        self.editing = Some(target);
        self.input_mode = InputMode::TextInput;
        if target == EditTarget::PublisherSearch {
            self.sidebar.suggestion_cursor = 0;
        }
    }

    fn stop_editing(&mut self) {
        self.editing = None;
        self.input_mode = InputMode::Normal;
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Abstract,
            Focus::Abstract => Focus::Results,
            Focus::Results if self.sidebar_open => Focus::Sidebar,
            Focus::Results => Focus::Abstract,
        };
    }

    fn move_cursor(&mut self, delta: i32) {
        match self.focus {
            Focus::Sidebar => {
                if delta > 0 {
                    self.sidebar.move_down(&self.filters);
                } else {
                    self.sidebar.move_up();
                }
            }
            Focus::Results => {
                if self.results.is_empty() {
                    return;
                }
                let last = self.results.len() - 1;
                let next = match self.results_state.selected() {
                    None => 0,
                    Some(i) if delta > 0 => (i + 1).min(last),
                    Some(i) => i.saturating_sub(1),
                };
                self.results_state.select(Some(next));
            }
            Focus::Abstract => {}
        }
    }

    fn adjust_slider(&mut self, steps: i32) {
        if self.focus != Focus::Sidebar {
            return;
        }
        match self.sidebar.current(&self.filters) {
            SidebarItem::ImpactFactor => {
                let v = step_impact_factor(self.filters.impact_factor(), steps);
                self.filters.set_impact_factor(v);
            }
            SidebarItem::DecisionTime => {
                let v = (self.filters.decision_time() as i64 + steps as i64).max(0);
                self.filters.set_decision_time(clamp_decision_time(v as u32));
            }
            _ => {}
        }
    }

    fn drill_in(&mut self) {
        match self.focus {
            Focus::Abstract => self.start_editing(EditTarget::Abstract),
            Focus::Results => {
                if let Some(i) = self.results_state.selected() {
                    self.results.select(i);
                }
            }
            Focus::Sidebar => match self.sidebar.current(&self.filters) {
                SidebarItem::Model(model) => self.filters.select_model(model),
                SidebarItem::PublisherSearch => self.start_editing(EditTarget::PublisherSearch),
                SidebarItem::Publisher(name) => {
                    self.filters.remove_publisher(&name);
                }
                SidebarItem::FindJournals => self.submit(),
                SidebarItem::ImpactFactor | SidebarItem::DecisionTime => {}
            },
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        if contains(self.last_results_area, x, y) {
            self.focus = Focus::Results;
            if let Some(index) = self.card_at_row(y) {
                self.results_state.select(Some(index));
                self.results.select(index);
            }
        } else if contains(self.last_abstract_area, x, y) {
            self.focus = Focus::Abstract;
            self.start_editing(EditTarget::Abstract);
        } else if contains(self.last_sidebar_area, x, y) {
            self.focus = Focus::Sidebar;
        }
    }

    /// Map a screen row inside the results list to a card index.
    fn card_at_row(&self, y: u16) -> Option<usize> {
        let area = self.last_results_area?;
        // One row of border above the first card.
        let inner_top = area.y + 1;
        if y < inner_top {
            return None;
        }
        let index = ((y - inner_top) / CARD_HEIGHT) as usize + self.results_state.offset();
        (index < self.results.len()).then_some(index)
    }

    fn handle_text_action(&mut self, action: Action) {
        match self.editing {
            Some(EditTarget::Abstract) => self.handle_abstract_edit(action),
            Some(EditTarget::PublisherSearch) => self.handle_publisher_edit(action),
            None => self.stop_editing(),
        }
    }

    fn handle_abstract_edit(&mut self, action: Action) {
        let input = &mut self.abstract_input;
        match action {
            Action::TextCancel => self.stop_editing(),
            Action::TextInput('\t') => {
                self.stop_editing();
                self.cycle_focus();
            }
            Action::TextInput(ch) => input.insert(ch),
            Action::TextConfirm => input.insert('\n'),
            Action::Backspace => input.backspace(),
            Action::DeleteForward => input.delete_forward(),
            Action::CursorLeft => input.move_left(),
            Action::CursorRight => input.move_right(),
            Action::CursorHome => input.move_home(),
            Action::CursorEnd => input.move_end(),
            Action::Submit => self.submit(),
            Action::Quit => {
                self.stop_editing();
                self.confirm_quit = true;
            }
            Action::ClickAt(x, y) => {
                if !contains(self.last_abstract_area, x, y) {
                    self.stop_editing();
                    self.click(x, y);
                }
            }
            _ => {}
        }
    }

    fn handle_publisher_edit(&mut self, action: Action) {
        match action {
            Action::TextCancel | Action::TextInput('\t') => self.stop_editing(),
            Action::TextInput(ch) => {
                self.filters.publisher_search_mut().push(ch);
                self.sidebar.suggestion_cursor = 0;
            }
            Action::Backspace => {
                self.filters.publisher_search_mut().pop();
                self.sidebar.suggestion_cursor = 0;
            }
            Action::MoveDown => {
                let count = self.filters.matching_publishers().len();
                if count > 0 {
                    self.sidebar.suggestion_cursor =
                        (self.sidebar.suggestion_cursor + 1).min(count - 1);
                }
            }
            Action::MoveUp => {
                self.sidebar.suggestion_cursor = self.sidebar.suggestion_cursor.saturating_sub(1);
            }
            Action::TextConfirm => {
                let suggestions = self.filters.matching_publishers();
                match suggestions.get(self.sidebar.suggestion_cursor) {
                    Some(name) => {
                        self.filters.choose_suggestion(name);
                        self.sidebar.suggestion_cursor = 0;
                    }
                    None => self.stop_editing(),
                }
            }
            Action::Submit => self.submit(),
            Action::Quit => {
                self.stop_editing();
                self.confirm_quit = true;
            }
            _ => {}
        }
    }

    /// Persist the current filters as startup defaults.
    fn save_filter_defaults(&mut self) {
        // Start from the user-level file only so project overrides stay local.
        let base = config_file::config_path()
            .and_then(|p| config_file::load_from_path(&p))
            .unwrap_or_else(ConfigFile::default);
        let merged = config_file::with_filter_defaults(base, &self.filters.to_defaults());
        match config_file::save_config(&merged) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "saved filter defaults");
                self.status_message = Some((format!("Saved to {}", path.display()), false));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save config");
                self.status_message = Some((format!("Save failed: {e}"), true));
            }
        }
    }
}
