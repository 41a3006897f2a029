use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                // Ctrl+C and Ctrl+R work regardless of mode
                match key.code {
                    KeyCode::Char('c') => return Action::Quit,
                    KeyCode::Char('r') => return Action::Submit,
                    _ => {}
                }
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::TextInput => map_key_text_input(key),
            }
        }
        // Bracketed pastes carry a whole string; main.rs routes them to App::paste.
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('l') | KeyCode::Right => Action::Increase,
        KeyCode::Char('h') | KeyCode::Left => Action::Decrease,
        KeyCode::Char('L') => Action::IncreaseLarge,
        KeyCode::Char('H') => Action::DecreaseLarge,
        KeyCode::Enter | KeyCode::Char(' ') => Action::DrillIn,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('x') | KeyCode::Delete => Action::Remove,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::SaveConfig,
        KeyCode::Char('r') | KeyCode::F(5) => Action::Submit,
        KeyCode::Char('[') => Action::ToggleSidebar,
        KeyCode::Tab => Action::CycleFocus,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

fn map_key_text_input(key: &KeyEvent) -> Action {
    // AltGr arrives as Ctrl+Alt on some terminals and still types text.
    let ctrl_only =
        key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Esc => Action::TextCancel,
        KeyCode::Enter => Action::TextConfirm,
        KeyCode::Char(_) if ctrl_only => Action::None,
        KeyCode::Char(c) => Action::TextInput(c),
        KeyCode::Tab => Action::TextInput('\t'),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::DeleteForward,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        _ => Action::None,
    }
}
