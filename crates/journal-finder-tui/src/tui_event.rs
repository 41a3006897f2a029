use journal_finder_core::{SearchOutcome, SearchTicket};

/// Commands sent from the TUI to the backend.
pub enum BackendCommand {
    /// Send this ticket's request to the ranking service.
    Search(SearchTicket),
}

/// Events flowing from the backend to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// The request for ticket `seq` settled.
    SearchFinished { seq: u64, outcome: SearchOutcome },
}
