use super::App;
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::SearchFinished { seq, outcome } => {
                let Some(journals) = self.search.resolve(seq, outcome) else {
                    return;
                };
                let empty = journals.is_empty();
                self.results.set_journals(journals);
                self.results_state = Default::default();
                if !empty {
                    self.results_state.select(Some(0));
                }
            }
        }
    }
}
