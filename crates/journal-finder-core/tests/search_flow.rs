//! End-to-end search flow against the [`MockRankingService`].
//!
//! No HTTP requests are made: the mock stands in for the ranking service
//! and records what it was sent.

use std::sync::Arc;
use std::time::Duration;

use journal_finder_core::service::mock::{MockRankingService, MockResponse};
use journal_finder_core::{
    FilterState, Journal, LlmModel, RankingService, ResultPresenter, SearchError,
    SearchOrchestrator, SearchPhase,
};

fn journal(id: u32, name: &str) -> Journal {
    Journal {
        id,
        name: name.to_string(),
        jif: 3.2,
        category: "Chemistry".to_string(),
        keywords: vec!["catalysis".to_string()],
        publisher: "Elsevier".to_string(),
        decision_time: 14,
    }
}

#[tokio::test]
async fn empty_abstract_sends_one_well_formed_request() {
    let service = MockRankingService::new(MockResponse::Journals(vec![]));
    let mut orch = SearchOrchestrator::new();
    let mut presenter = ResultPresenter::new();

    orch.search(&service, &mut presenter, "", FilterState::default().commit())
        .await;

    assert_eq!(service.call_count(), 1);
    let sent = service.requests();
    let body = serde_json::to_value(&sent[0]).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "abstract": "",
            "criteria": {
                "impactFactor": 0.0,
                "firstDecisionTime": 30,
                "publisher": "",
                "llmModel": "faiss"
            }
        })
    );
    assert_eq!(orch.phase(), &SearchPhase::Resolved { count: 0 });
    assert!(presenter.is_empty());
}

#[tokio::test]
async fn results_are_shown_verbatim() {
    let list = vec![journal(2, "Second"), journal(1, "First")];
    let service = MockRankingService::new(MockResponse::Journals(list.clone()));
    let mut orch = SearchOrchestrator::new();
    let mut presenter = ResultPresenter::new();

    let mut filters = FilterState::default();
    filters.set_impact_factor(5.0);
    filters.select_model(LlmModel::Mixtral);
    orch.search(&service, &mut presenter, "catalysis", filters.commit())
        .await;

    assert_eq!(presenter.journals(), list.as_slice());
    assert_eq!(service.requests()[0].criteria.llm_model, LlmModel::Mixtral);
}

#[tokio::test]
async fn failure_clears_previous_results() {
    let service = MockRankingService::with_sequence(vec![
        MockResponse::Journals(vec![journal(1, "Kept")]),
        MockResponse::Error(SearchError::Status {
            status: 502,
            reason: "Bad Gateway".to_string(),
        }),
    ]);
    let mut orch = SearchOrchestrator::new();
    let mut presenter = ResultPresenter::new();
    let criteria = FilterState::default().commit();

    orch.search(&service, &mut presenter, "a", criteria.clone()).await;
    assert_eq!(presenter.len(), 1);
    presenter.select(0);

    orch.search(&service, &mut presenter, "a", criteria).await;
    assert!(presenter.is_empty());
    assert!(presenter.active().is_none());
    assert!(matches!(orch.phase(), SearchPhase::Failed(SearchError::Status { status: 502, .. })));
}

#[tokio::test]
async fn malformed_response_yields_no_journals() {
    let service = MockRankingService::new(MockResponse::Error(SearchError::Malformed {
        body: r#"{"error":"bad request"}"#.to_string(),
    }));
    let mut orch = SearchOrchestrator::new();
    let mut presenter = ResultPresenter::new();

    orch.search(&service, &mut presenter, "x", FilterState::default().commit())
        .await;

    assert!(presenter.is_empty());
    assert!(matches!(orch.phase(), SearchPhase::Failed(SearchError::Malformed { .. })));
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_does_not_overwrite_newer_one() {
    let slow = Arc::new(
        MockRankingService::new(MockResponse::Journals(vec![journal(1, "Stale")]))
            .with_delay(Duration::from_secs(5)),
    );
    let fast = Arc::new(MockRankingService::new(MockResponse::Journals(vec![journal(
        2, "Fresh",
    )])));

    let mut orch = SearchOrchestrator::new();
    let mut presenter = ResultPresenter::new();
    let criteria = FilterState::default().commit();

    let first = orch.begin("first", criteria.clone());
    let second = orch.begin("second", criteria);

    let slow_task = {
        let slow = Arc::clone(&slow);
        let request = first.request.clone();
        tokio::spawn(async move { slow.rank(&request).await })
    };
    let fast_task = {
        let fast = Arc::clone(&fast);
        let request = second.request.clone();
        tokio::spawn(async move { fast.rank(&request).await })
    };

    let fresh = fast_task.await.unwrap();
    if let Some(list) = orch.resolve(second.seq, fresh) {
        presenter.set_journals(list);
    }
    let stale = slow_task.await.unwrap();
    if let Some(list) = orch.resolve(first.seq, stale) {
        presenter.set_journals(list);
    }

    assert_eq!(presenter.len(), 1);
    assert_eq!(presenter.journals()[0].name, "Fresh");
}
