//! 検索語の抽出

use crate::types::{ParsedRow, SourceTerm};
use std::collections::HashSet;

/// 指定列から検索語を抽出（重複除去・出現順維持）
pub fn collect_unique_terms(rows: &[ParsedRow], column: &str) -> Vec<SourceTerm> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter_map(|value| SourceTerm::new(&value.as_term_text()))
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn row(pairs: &[(&str, CellValue)]) -> ParsedRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_collect_unique_terms() {
        let rows = vec![
            row(&[("keyword", text("Yoga")), ("other", text("x"))]),
            row(&[("keyword", text("  Golf "))]),
            row(&[("keyword", text("Yoga"))]),
            row(&[("keyword", text("Golf"))]),
            row(&[("other", text("no keyword"))]),
            row(&[("keyword", text("   "))]),
        ];

        let terms = collect_unique_terms(&rows, "keyword");
        let terms: Vec<&str> = terms.iter().map(|t| t.as_str()).collect();
        assert_eq!(terms, vec!["Yoga", "Golf"]);
    }

    #[test]
    fn test_numbers_become_terms() {
        let rows = vec![
            row(&[("code", CellValue::Number(2024.0))]),
            row(&[("code", CellValue::Number(0.0))]),
            row(&[("code", text("2024"))]),
        ];

        let terms = collect_unique_terms(&rows, "code");
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].as_str(), "2024");
    }

    #[test]
    fn test_case_sensitive_dedup() {
        let rows = vec![
            row(&[("k", text("yoga"))]),
            row(&[("k", text("Yoga"))]),
        ];
        assert_eq!(collect_unique_terms(&rows, "k").len(), 2);
    }

    #[test]
    fn test_missing_column() {
        let rows = vec![row(&[("k", text("yoga"))])];
        assert!(collect_unique_terms(&rows, "missing").is_empty());
    }
}
