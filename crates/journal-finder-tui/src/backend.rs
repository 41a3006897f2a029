use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use journal_finder_core::{Config, HttpRankingService, RankingService, SearchTicket};

use crate::tui_event::BackendEvent;

/// Build the ranking service described by `config`.
pub fn build_service(config: &Config) -> anyhow::Result<Arc<dyn RankingService>> {
    let service = HttpRankingService::new(
        config.endpoint.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;
    Ok(Arc::new(service))
}

/// Run one search and report its outcome.
///
/// Nothing is cancelled: if a newer search was issued meanwhile, the app
/// discards this outcome by sequence number.
pub async fn run_search(
    service: Arc<dyn RankingService>,
    ticket: SearchTicket,
    tx: mpsc::UnboundedSender<BackendEvent>,
) {
    tracing::debug!(seq = ticket.seq, service = service.name(), "sending search request");
    let outcome = service.rank(&ticket.request).await;
    let _ = tx.send(BackendEvent::SearchFinished {
        seq: ticket.seq,
        outcome,
    });
}
