//! 照合パイプラインのテスト
//!
//! 検索APIの代わりに固定の候補を返す検索実装を使う

use async_trait::async_trait;
use futures::StreamExt;
use interest_matcher::error::{MatcherError, Result};
use interest_matcher::pipeline::{resolve_all, resolve_term, resolve_terms};
use interest_matcher::search::InterestSearch;
use interest_matcher_common::{set_selection, Candidate, SourceTerm};
use std::collections::HashMap;
use std::sync::Mutex;

/// 固定応答の検索実装（呼び出し順を記録）
struct FakeSearch {
    responses: HashMap<String, Vec<Candidate>>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSearch {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            failing: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with(mut self, term: &str, candidates: Vec<Candidate>) -> Self {
        self.responses.insert(term.to_string(), candidates);
        self
    }

    fn failing(mut self, term: &str) -> Self {
        self.failing.push(term.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InterestSearch for FakeSearch {
    async fn search(&self, term: &str) -> Result<Vec<Candidate>> {
        self.calls.lock().unwrap().push(term.to_string());
        if self.failing.iter().any(|t| t == term) {
            return Err(MatcherError::Upstream {
                status: 500,
                message: "Service temporarily unavailable".into(),
            });
        }
        Ok(self.responses.get(term).cloned().unwrap_or_default())
    }
}

fn terms(values: &[&str]) -> Vec<SourceTerm> {
    values.iter().filter_map(|v| SourceTerm::new(v)).collect()
}

fn shoes_candidates() -> Vec<Candidate> {
    vec![
        Candidate::new("1", "Running").with_audience(50_000_000),
        Candidate::new("2", "Running shoes").with_audience(2_000_000),
        Candidate::new("3", "Shoes").with_audience(80_000_000),
    ]
}

#[tokio::test]
async fn test_resolve_term_ranks_candidates() {
    let search = FakeSearch::new().with("running shoes", shoes_candidates());

    let result = resolve_term(&search, SourceTerm::new("running shoes").unwrap()).await;

    assert_eq!(result.candidates.len(), 3);
    assert_eq!(result.candidates[0].name, "Running shoes");
    assert_eq!(result.selected_id(), Some("2"));
    assert!(result.error.is_none());
    // 全候補にスコアが付く
    assert!(result.candidates.iter().all(|c| c.similarity_score.is_some()));
}

#[tokio::test]
async fn test_resolve_term_without_candidates() {
    let search = FakeSearch::new();

    let result = resolve_term(&search, SourceTerm::new("zzzz").unwrap()).await;

    assert!(result.candidates.is_empty());
    assert!(result.selected.is_none());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_failure_does_not_stop_processing() {
    let search = FakeSearch::new()
        .with("yoga", vec![Candidate::new("10", "Yoga")])
        .with("golf", vec![Candidate::new("20", "Golf")])
        .failing("tennis");

    let results = resolve_all(&search, terms(&["yoga", "tennis", "golf"])).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].selected_id(), Some("10"));

    // 失敗した語は候補なしの行として残る
    assert_eq!(results[1].source_term.as_str(), "tennis");
    assert!(results[1].candidates.is_empty());
    assert!(results[1].selected.is_none());
    assert!(results[1].error.is_some());

    assert_eq!(results[2].selected_id(), Some("20"));
}

#[tokio::test]
async fn test_terms_are_searched_in_order() {
    let search = FakeSearch::new();

    let outcomes: Vec<_> = resolve_terms(&search, terms(&["c", "a", "b"])).collect().await;

    assert_eq!(search.calls(), vec!["c", "a", "b"]);
    let positions: Vec<(usize, usize)> = outcomes.iter().map(|o| (o.index, o.total)).collect();
    assert_eq!(positions, vec![(0, 3), (1, 3), (2, 3)]);
}

#[tokio::test]
async fn test_outcome_reports_next_term() {
    let search = FakeSearch::new();

    let outcomes: Vec<_> = resolve_terms(&search, terms(&["yoga", "golf", "tennis"]))
        .collect()
        .await;

    let next: Vec<Option<&str>> = outcomes
        .iter()
        .map(|o| o.next_term.as_ref().map(|t| t.as_str()))
        .collect();
    assert_eq!(next, vec![Some("golf"), Some("tennis"), None]);
}

#[tokio::test]
async fn test_stream_is_lazy() {
    let search = FakeSearch::new();

    let mut stream = Box::pin(resolve_terms(&search, terms(&["one", "two", "three"])));
    assert!(search.calls().is_empty());

    let first = stream.next().await.unwrap();
    assert_eq!(first.result.source_term.as_str(), "one");
    assert_eq!(search.calls(), vec!["one"]);
}

#[tokio::test]
async fn test_works_with_trait_object() {
    let search: Box<dyn InterestSearch> =
        Box::new(FakeSearch::new().with("yoga", vec![Candidate::new("10", "Yoga")]));

    let results = resolve_all(search.as_ref(), terms(&["yoga"])).await;
    assert_eq!(results[0].selected_id(), Some("10"));
}

#[tokio::test]
async fn test_override_after_resolve() {
    let search = FakeSearch::new().with("running shoes", shoes_candidates());
    let results = resolve_all(&search, terms(&["running shoes"])).await;

    let updated = set_selection(&results, 0, "3").unwrap();

    assert_eq!(updated[0].selected_id(), Some("3"));
    // 元の結果は変わらない
    assert_eq!(results[0].selected_id(), Some("2"));
    // 候補の並びも変わらない
    assert_eq!(updated[0].candidates, results[0].candidates);
}
