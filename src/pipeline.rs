//! 検索語ごとの照合処理
//!
//! 検索語を入力順に1件ずつ検索・ランキングする遅延ストリーム。
//! 1件の失敗は空の結果行として記録し、残りの処理は続ける。

use crate::search::InterestSearch;
use futures::stream::{self, Stream, StreamExt};
use interest_matcher_common::{rank, MatchResult, SourceTerm};

/// 1件分の処理結果
#[derive(Debug, Clone)]
pub struct TermOutcome {
    /// 0始まりの位置
    pub index: usize,
    pub total: usize,
    pub result: MatchResult,
    /// 次に検索する語（最後ならNone）
    pub next_term: Option<SourceTerm>,
}

/// 1語を検索してランキング
pub async fn resolve_term<S>(search: &S, term: SourceTerm) -> MatchResult
where
    S: InterestSearch + ?Sized,
{
    match search.search(term.as_str()).await {
        Ok(candidates) => {
            let ranked = rank(term.as_str(), &candidates);
            MatchResult::from_ranked(term, ranked)
        }
        Err(e) => {
            tracing::warn!(term = term.as_str(), error = %e, "検索失敗");
            MatchResult::failed(term, e.to_string())
        }
    }
}

/// 検索語を順番に処理するストリーム（同時実行なし）
pub fn resolve_terms<'a, S>(
    search: &'a S,
    terms: Vec<SourceTerm>,
) -> impl Stream<Item = TermOutcome> + 'a
where
    S: InterestSearch + ?Sized,
{
    let total = terms.len();
    let upcoming: Vec<Option<SourceTerm>> = terms
        .iter()
        .skip(1)
        .cloned()
        .map(Some)
        .chain(std::iter::once(None))
        .collect();

    stream::iter(terms.into_iter().zip(upcoming).enumerate()).then(
        move |(index, (term, next_term))| async move {
            let result = resolve_term(search, term).await;
            TermOutcome { index, total, result, next_term }
        },
    )
}

/// 全件処理して結果を集める
pub async fn resolve_all<S>(search: &S, terms: Vec<SourceTerm>) -> Vec<MatchResult>
where
    S: InterestSearch + ?Sized,
{
    resolve_terms(search, terms)
        .map(|outcome| outcome.result)
        .collect()
        .await
}
