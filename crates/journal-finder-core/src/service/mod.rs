//! Ranking service trait and implementations.

pub mod http;
#[cfg(feature = "test-support")]
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use thiserror::Error;

use crate::{Journal, SearchRequest};

pub use http::HttpRankingService;

/// How many bytes of an unexpected body are kept for diagnostics.
const MAX_BODY_EXCERPT: usize = 2048;

/// Why a search produced no result list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Network unreachable, connection reset, request aborted.
    #[error("transport error: {0}")]
    Transport(String),
    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Non-success status code.
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },
    /// Success status but the body lacked a usable `result` list.
    #[error("unexpected response structure: {body}")]
    Malformed { body: String },
}

pub type SearchOutcome = Result<Vec<Journal>, SearchError>;

/// A remote service that ranks journals for an abstract.
pub trait RankingService: Send + Sync {
    /// Short name used in logs (e.g. the endpoint host).
    fn name(&self) -> &str;

    /// Send one ranking request.
    fn rank<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> Pin<Box<dyn Future<Output = SearchOutcome> + Send + 'a>>;
}

/// Turn a ranking-service response into an outcome.
///
/// Only a 2xx response whose JSON body has a `result` array of journals
/// counts as success. Everything else becomes a [`SearchError`].
pub async fn interpret_response(resp: reqwest::Response) -> SearchOutcome {
    let status = resp.status();
    if !status.is_success() {
        return Err(SearchError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        });
    }

    let body = resp
        .text()
        .await
        .map_err(|e| SearchError::Transport(e.to_string()))?;
    parse_result_body(&body)
}

/// Extract the `result` list from a response body.
///
/// Rows are decoded one at a time. A row that cannot be read is logged and
/// skipped; the list only counts as malformed when no row survives.
pub fn parse_result_body(body: &str) -> SearchOutcome {
    let malformed = || SearchError::Malformed {
        body: excerpt(body),
    };

    let data: serde_json::Value = serde_json::from_str(body).map_err(|_| malformed())?;
    let Some(serde_json::Value::Array(rows)) = data.get("result") else {
        return Err(malformed());
    };

    let mut journals = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match Journal::deserialize(row) {
            Ok(journal) => journals.push(journal),
            Err(e) => tracing::warn!(index, error = %e, "skipping unreadable journal row"),
        }
    }
    if journals.is_empty() && !rows.is_empty() {
        return Err(malformed());
    }
    Ok(journals)
}

fn excerpt(body: &str) -> String {
    if body.len() <= MAX_BODY_EXCERPT {
        return body.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}\u{2026}", &body[..end])
}
