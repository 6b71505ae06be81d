//! 類似度ランキング
//!
//! 検索語と候補名の文字バイグラム類似度（Dice係数）で候補を並べ替える。
//! 類似度の差が小さい場合はオーディエンスサイズの大きい方を優先する。

use crate::types::Candidate;
use std::cmp::Ordering;
use std::collections::HashMap;

/// この差未満の類似度は「同程度」とみなす
pub const AUDIENCE_TIE_THRESHOLD: f64 = 0.1;

/// 比較用の正規化（小文字化 + 前後空白除去）
fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// 文字バイグラムの出現回数
fn bigram_counts(chars: &[char]) -> HashMap<(char, char), usize> {
    let mut counts = HashMap::new();
    for pair in chars.windows(2) {
        *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

/// 2文字列の類似度（0.0〜1.0）
///
/// 文字列内の空白を除いた上で、文字バイグラムの多重集合に対する
/// Dice係数を返す。2文字未満の文字列は完全一致のみ1.0。
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().filter(|c| !c.is_whitespace()).collect();
    let b: Vec<char> = b.chars().filter(|c| !c.is_whitespace()).collect();

    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut first = bigram_counts(&a);
    let mut intersection = 0usize;
    for pair in b.windows(2) {
        if let Some(count) = first.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                intersection += 1;
            }
        }
    }

    let total = (a.len() - 1) + (b.len() - 1);
    (2 * intersection) as f64 / total as f64
}

/// 正規化後の類似度
pub fn normalized_similarity(source: &str, label: &str) -> f64 {
    similarity(&normalize_text(source), &normalize_text(label))
}

/// 並べ替えの比較関数
///
/// スコア降順。差が閾値未満で両方のオーディエンスが非ゼロなら
/// オーディエンス降順。全順序ではない点に注意。
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    let score_a = a.similarity_score.unwrap_or(0.0);
    let score_b = b.similarity_score.unwrap_or(0.0);
    let diff = score_b - score_a;

    let audiences = (
        a.audience_size.filter(|&n| n > 0),
        b.audience_size.filter(|&n| n > 0),
    );
    if let (Some(aud_a), Some(aud_b)) = audiences {
        if diff.abs() < AUDIENCE_TIE_THRESHOLD {
            return aud_b.cmp(&aud_a);
        }
    }

    diff.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

/// 安定な挿入ソート
///
/// 比較関数が推移的でなくても停止・パニックしない。
/// 候補は検索1回あたり高々数十件なのでO(n²)で十分。
fn insertion_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// スコア設定済みの候補を並べ替える
pub fn sort_scored(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    insertion_sort_by(&mut candidates, compare_candidates);
    candidates
}

/// 候補に類似度を付けて並べ替えた新しいリストを返す
pub fn rank(source: &str, candidates: &[Candidate]) -> Vec<Candidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let scored = candidates
        .iter()
        .map(|candidate| Candidate {
            similarity_score: Some(normalized_similarity(source, &candidate.name)),
            ..candidate.clone()
        })
        .collect();

    sort_scored(scored)
}

/// 最良候補（ランキング済みリストの先頭）
pub fn select_best<'a>(_source: &str, ranked: &'a [Candidate]) -> Option<&'a Candidate> {
    ranked.first()
}
