//! Search lifecycle: snapshot inputs, issue one request, apply the latest response.
//!
//! A search is split in two so that a UI loop can keep running while the
//! request is in flight: [`SearchOrchestrator::begin`] moves to `Loading` and
//! hands back a [`SearchTicket`]; the outcome of that ticket is later fed to
//! [`SearchOrchestrator::resolve`]. Every ticket carries a sequence number and
//! only the most recently issued one is applied.

use crate::presenter::ResultPresenter;
use crate::service::{RankingService, SearchError, SearchOutcome};
use crate::{FilterCriteria, Journal, SearchRequest};

/// Where the orchestrator is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    Idle,
    Loading,
    /// Last search returned a list (possibly empty).
    Resolved { count: usize },
    /// Last search failed. Shown to users as an empty list.
    Failed(SearchError),
}

/// One issued request: its sequence number and the exact payload to send.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub seq: u64,
    pub request: SearchRequest,
}

#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    phase: SearchPhase,
    latest_seq: u64,
}

impl Default for SearchOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchOrchestrator {
    pub fn new() -> Self {
        Self {
            phase: SearchPhase::Idle,
            latest_seq: 0,
        }
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    /// Sequence number of the most recently issued ticket (0 = none yet).
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Start a search. Enters `Loading` immediately; any earlier ticket
    /// becomes stale. The abstract may be empty.
    pub fn begin(&mut self, abstract_text: &str, criteria: FilterCriteria) -> SearchTicket {
        self.latest_seq += 1;
        self.phase = SearchPhase::Loading;
        tracing::debug!(
            seq = self.latest_seq,
            model = %criteria.llm_model,
            abstract_len = abstract_text.len(),
            "search started"
        );
        SearchTicket {
            seq: self.latest_seq,
            request: SearchRequest {
                abstract_text: abstract_text.to_string(),
                criteria,
            },
        }
    }

    /// Apply the outcome of ticket `seq`.
    ///
    /// Returns the journals to display, or `None` if the ticket is stale or
    /// was already resolved. Failures yield `Some(vec![])`.
    pub fn resolve(&mut self, seq: u64, outcome: SearchOutcome) -> Option<Vec<Journal>> {
        if seq != self.latest_seq || !self.is_loading() {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale search response");
            return None;
        }

        match outcome {
            Ok(journals) => {
                tracing::info!(seq, count = journals.len(), "search resolved");
                self.phase = SearchPhase::Resolved {
                    count: journals.len(),
                };
                Some(journals)
            }
            Err(err) => {
                match &err {
                    SearchError::Malformed { body } => {
                        tracing::warn!(seq, %body, "unexpected response structure");
                    }
                    other => {
                        tracing::warn!(seq, error = %other, "failed to fetch journals");
                    }
                }
                self.phase = SearchPhase::Failed(err);
                Some(Vec::new())
            }
        }
    }

    /// Run a full search against `service` and publish the result into `presenter`.
    pub async fn search(
        &mut self,
        service: &dyn RankingService,
        presenter: &mut ResultPresenter,
        abstract_text: &str,
        criteria: FilterCriteria,
    ) {
        presenter.clear();
        let ticket = self.begin(abstract_text, criteria);
        let outcome = service.rank(&ticket.request).await;
        if let Some(journals) = self.resolve(ticket.seq, outcome) {
            presenter.set_journals(journals);
        }
    }
}
