/// Everything the update loop reacts to, decoupled from raw terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Tick,
    Resize(u16, u16),
    Quit,
    /// Esc: close overlay / leave the current context.
    NavigateBack,
    MoveUp,
    MoveDown,
    /// Nudge the focused slider by one step (or ten with `Large`).
    Increase,
    Decrease,
    IncreaseLarge,
    DecreaseLarge,
    /// Tab: sidebar -> abstract -> results.
    CycleFocus,
    ToggleSidebar,
    /// Enter in normal mode.
    DrillIn,
    /// Remove the publisher under the cursor / close the detail view.
    Remove,
    /// Run a search with the current abstract and filters.
    Submit,
    ToggleHelp,
    SaveConfig,
    ClickAt(u16, u16),

    // Text editing
    TextInput(char),
    TextConfirm,
    TextCancel,
    Backspace,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
}
