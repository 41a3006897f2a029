//! Mock ranking service for testing.
//!
//! Only built with the `test-support` feature.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{RankingService, SearchError, SearchOutcome};
use crate::{Journal, SearchRequest};

/// A configurable response for [`MockRankingService`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    Journals(Vec<Journal>),
    Error(SearchError),
}

/// A hand-rolled mock implementing [`RankingService`].
///
/// Returns either a fixed response or a sequence (one per call, repeating the
/// last), optionally after a delay, and records every request it receives.
pub struct MockRankingService {
    responses: Mutex<Vec<MockResponse>>,
    fallback: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockRankingService {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            delay: None,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that returns responses in order, repeating the last one.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Reverse so pop() yields them in order.
        responses.reverse();
        let fallback = responses[0].clone();
        Self {
            responses: Mutex::new(responses),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn next_response(&self) -> MockResponse {
        let mut seq = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        seq.pop().unwrap_or_else(|| self.fallback.clone())
    }
}

impl RankingService for MockRankingService {
    fn name(&self) -> &str {
        "mock"
    }

    fn rank<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> Pin<Box<dyn Future<Output = SearchOutcome> + Send + 'a>> {
        Box::pin(async move {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(request.clone());
            let response = self.next_response();
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match response {
                MockResponse::Journals(journals) => Ok(journals),
                MockResponse::Error(e) => Err(e),
            }
        })
    }
}
