//! 照合結果 → 出力レコード変換

use super::layout::{EXPORT_FIELDS, PATH_SEPARATOR};
use crate::types::MatchResult;

/// 出力セル値
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Text(String),
    Integer(u64),
    /// 0.0〜1.0（シート上は%表示）
    Percent(f64),
    Empty,
}

/// 1行分の出力レコード（列ラベル → 値、列順を保持）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRecord {
    pub fields: Vec<(String, ExportValue)>,
}

impl ExportRecord {
    pub fn push(&mut self, label: impl Into<String>, value: ExportValue) {
        self.fields.push((label.into(), value));
    }

    pub fn get(&self, label: &str) -> Option<&ExportValue> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }
}

fn text_or_empty(value: &str) -> ExportValue {
    if value.is_empty() {
        ExportValue::Empty
    } else {
        ExportValue::Text(value.to_string())
    }
}

/// フィールド値を取得
fn field_value(result: &MatchResult, key: &str) -> ExportValue {
    let selected = result.selected.as_ref();
    match key {
        "sourceTerm" => text_or_empty(result.source_term.as_str()),
        "selectedName" => selected.map_or(ExportValue::Empty, |c| text_or_empty(&c.name)),
        "selectedId" => selected.map_or(ExportValue::Empty, |c| text_or_empty(&c.id)),
        "audienceSize" => selected
            .and_then(|c| c.audience_size)
            .map_or(ExportValue::Empty, ExportValue::Integer),
        "similarityScore" => selected
            .and_then(|c| c.similarity_score)
            .map_or(ExportValue::Empty, ExportValue::Percent),
        "path" => selected.map_or(ExportValue::Empty, |c| {
            text_or_empty(&c.path.join(PATH_SEPARATOR))
        }),
        "candidateCount" => ExportValue::Integer(result.candidates.len() as u64),
        "error" => result
            .error
            .as_deref()
            .map_or(ExportValue::Empty, text_or_empty),
        _ => ExportValue::Empty,
    }
}

/// 照合結果を出力レコードに変換
pub fn prepare_export_records(results: &[MatchResult]) -> Vec<ExportRecord> {
    results
        .iter()
        .map(|result| {
            let mut record = ExportRecord::default();
            for field in EXPORT_FIELDS {
                record.push(field.label, field_value(result, field.key));
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranker::rank;
    use crate::types::{Candidate, SourceTerm};

    #[test]
    fn test_prepare_selected_row() {
        let term = SourceTerm::new("running shoes").unwrap();
        let ranked = rank(
            term.as_str(),
            &[Candidate::new("10", "Running Shoes")
                .with_audience(1_000_000)
                .with_path(["Interests", "Sports", "Running Shoes"])],
        );
        let records = prepare_export_records(&[MatchResult::from_ranked(term, ranked)]);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.get("Original Value"), Some(&ExportValue::Text("running shoes".into())));
        assert_eq!(record.get("Selected Interest"), Some(&ExportValue::Text("Running Shoes".into())));
        assert_eq!(record.get("Interest ID"), Some(&ExportValue::Text("10".into())));
        assert_eq!(record.get("Audience Size"), Some(&ExportValue::Integer(1_000_000)));
        assert_eq!(record.get("Similarity Score"), Some(&ExportValue::Percent(1.0)));
        assert_eq!(
            record.get("Category Path"),
            Some(&ExportValue::Text("Interests > Sports > Running Shoes".into()))
        );
        assert_eq!(record.get("Candidates"), Some(&ExportValue::Integer(1)));
        assert_eq!(record.get("Error"), Some(&ExportValue::Empty));
    }

    #[test]
    fn test_prepare_failed_row() {
        let term = SourceTerm::new("golf").unwrap();
        let records = prepare_export_records(&[MatchResult::failed(term, "HTTP 500")]);

        let record = &records[0];
        assert_eq!(record.get("Selected Interest"), Some(&ExportValue::Empty));
        assert_eq!(record.get("Candidates"), Some(&ExportValue::Integer(0)));
        assert_eq!(record.get("Error"), Some(&ExportValue::Text("HTTP 500".into())));
    }

    #[test]
    fn test_labels_follow_layout_order() {
        let term = SourceTerm::new("golf").unwrap();
        let records = prepare_export_records(&[MatchResult::from_ranked(term, Vec::new())]);

        let labels: Vec<&str> = records[0].labels().collect();
        let expected: Vec<&str> = EXPORT_FIELDS.iter().map(|f| f.label).collect();
        assert_eq!(labels, expected);
    }
}
