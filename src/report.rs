//! 照合結果の表示

use interest_matcher_common::{Candidate, MatchResult};

/// 値がない場合の表示
pub const PLACEHOLDER: &str = "—";

/// 類似度を "NN%" 表示（未設定・0は "—"）
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) if s > 0.0 => format!("{:.0}%", s * 100.0),
        _ => PLACEHOLDER.to_string(),
    }
}

/// オーディエンスサイズを3桁区切りで表示（未設定・0は "—"）
pub fn format_audience(audience: Option<u64>) -> String {
    match audience {
        Some(n) if n > 0 => group_thousands(n),
        _ => PLACEHOLDER.to_string(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 候補1件の表示（選択肢用）
pub fn candidate_label(candidate: &Candidate) -> String {
    let mut parts = vec![candidate.name.clone()];
    if let Some(score) = candidate.similarity_score.filter(|&s| s > 0.0) {
        parts.push(format!("{:.0}%", score * 100.0));
    }
    parts.push(match candidate.audience_size {
        Some(n) if n > 0 => format!("Audience: {}", group_thousands(n)),
        _ => "Audience: unknown".to_string(),
    });
    parts.join("  ")
}

/// 結果一覧を表形式で出力
pub fn print_results(results: &[MatchResult]) {
    println!(
        "{:>4}  {:<28}  {:<32}  {:>14}  {:>6}",
        "#", "元の値", "選択中の候補", "オーディエンス", "類似度"
    );
    for (i, result) in results.iter().enumerate() {
        let selected = result.selected.as_ref();
        println!(
            "{:>4}  {:<28}  {:<32}  {:>14}  {:>6}",
            i + 1,
            result.source_term.as_str(),
            selected.map_or(PLACEHOLDER, |c| c.name.as_str()),
            format_audience(selected.and_then(|c| c.audience_size)),
            format_score(selected.and_then(|c| c.similarity_score)),
        );
        if let Some(error) = &result.error {
            println!("      ⚠ {}", error);
        }
    }
}

/// 処理結果の集計
pub fn summarize(results: &[MatchResult]) -> (usize, usize, usize) {
    let matched = results.iter().filter(|r| r.selected.is_some()).count();
    let failed = results.iter().filter(|r| r.error.is_some()).count();
    (matched, results.len().saturating_sub(matched + failed), failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use interest_matcher_common::SourceTerm;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(1.0)), "100%");
        assert_eq!(format_score(Some(0.534)), "53%");
        assert_eq!(format_score(Some(0.0)), PLACEHOLDER);
        assert_eq!(format_score(None), PLACEHOLDER);
    }

    #[test]
    fn test_format_audience() {
        assert_eq!(format_audience(Some(1_234_567)), "1,234,567");
        assert_eq!(format_audience(Some(999)), "999");
        assert_eq!(format_audience(Some(1000)), "1,000");
        assert_eq!(format_audience(Some(0)), PLACEHOLDER);
        assert_eq!(format_audience(None), PLACEHOLDER);
    }

    #[test]
    fn test_candidate_label() {
        let candidate = Candidate {
            similarity_score: Some(0.8),
            ..Candidate::new("1", "Yoga").with_audience(12000)
        };
        assert_eq!(candidate_label(&candidate), "Yoga  80%  Audience: 12,000");

        let unknown = Candidate::new("2", "Pilates");
        assert_eq!(candidate_label(&unknown), "Pilates  Audience: unknown");
    }

    #[test]
    fn test_summarize() {
        let results = vec![
            MatchResult::from_ranked(SourceTerm::new("a").unwrap(), vec![Candidate::new("1", "A")]),
            MatchResult::from_ranked(SourceTerm::new("b").unwrap(), Vec::new()),
            MatchResult::failed(SourceTerm::new("c").unwrap(), "HTTP 500"),
        ];
        assert_eq!(summarize(&results), (1, 1, 1));
    }
}
