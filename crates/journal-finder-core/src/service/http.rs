use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::{RankingService, SearchError, SearchOutcome, interpret_response};
use crate::{CoreError, SearchRequest};

/// Ranking service reached over HTTP: one JSON `POST` per search.
pub struct HttpRankingService {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpRankingService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("journal-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(endpoint, client, timeout))
    }

    /// Reuse an existing client (shared connection pool).
    pub fn with_client(
        endpoint: impl Into<String>,
        client: reqwest::Client,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RankingService for HttpRankingService {
    fn name(&self) -> &str {
        &self.endpoint
    }

    fn rank<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> Pin<Box<dyn Future<Output = SearchOutcome> + Send + 'a>> {
        Box::pin(async move {
            let resp = self
                .client
                .post(&self.endpoint)
                .json(request)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        SearchError::Timeout
                    } else {
                        SearchError::Transport(e.to_string())
                    }
                })?;

            interpret_response(resp).await
        })
    }
}
