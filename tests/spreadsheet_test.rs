//! スプレッドシート読み書きテスト
//!
//! rust_xlsxwriterで入力ファイルを作り、読み込み → 抽出 → 出力を検証

use interest_matcher::spreadsheet;
use interest_matcher_common::{collect_unique_terms, Candidate, CellValue, MatchResult, SourceTerm};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// テスト用の入力ファイルを作成
fn create_input_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("keywords.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    // ヘッダー: keyword, (空), category, keyword
    sheet.write_string(0, 0, "keyword").unwrap();
    sheet.write_string(0, 2, "category").unwrap();
    sheet.write_string(0, 3, "keyword").unwrap();
    sheet.write_string(0, 1, "").unwrap();

    sheet.write_string(1, 0, "Yoga").unwrap();
    sheet.write_string(1, 2, "sports").unwrap();
    sheet.write_string(2, 0, "  Golf ").unwrap();
    sheet.write_number(2, 1, 3.0).unwrap();
    sheet.write_string(3, 0, "Yoga").unwrap();
    // 4行目は空行
    sheet.write_number(5, 0, 42.0).unwrap();
    sheet.write_string(5, 3, "dup column").unwrap();

    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_read_spreadsheet_headers_and_rows() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = create_input_workbook(dir.path());

    let sheet = spreadsheet::read_spreadsheet(&path).unwrap();

    assert_eq!(sheet.columns, vec!["keyword", "__EMPTY", "category", "keyword_1"]);
    // 空行はスキップ
    assert_eq!(sheet.rows.len(), 4);

    assert_eq!(sheet.rows[0].get("keyword"), Some(&CellValue::Text("Yoga".into())));
    assert_eq!(sheet.rows[0].get("category"), Some(&CellValue::Text("sports".into())));
    assert_eq!(sheet.rows[1].get("__EMPTY"), Some(&CellValue::Number(3.0)));
    assert_eq!(sheet.rows[3].get("keyword_1"), Some(&CellValue::Text("dup column".into())));
    // 空セルはキーなし
    assert!(sheet.rows[1].get("category").is_none());
}

#[test]
fn test_collect_terms_from_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = create_input_workbook(dir.path());

    let sheet = spreadsheet::read_spreadsheet(&path).unwrap();
    let terms = collect_unique_terms(&sheet.rows, "keyword");
    let terms: Vec<&str> = terms.iter().map(|t| t.as_str()).collect();

    assert_eq!(terms, vec!["Yoga", "Golf", "42"]);
}

#[test]
fn test_read_spreadsheet_bytes_rejects_extension() {
    let result = spreadsheet::read_spreadsheet_bytes("keywords.txt", b"PK".to_vec());
    assert!(result.is_err());
}

#[test]
fn test_export_results_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");

    let yoga = Candidate {
        similarity_score: Some(1.0),
        ..Candidate::new("6003", "Yoga")
            .with_audience(12_000)
            .with_path(["Interests", "Fitness and wellness", "Yoga"])
    };
    let results = vec![
        MatchResult::from_ranked(SourceTerm::new("Yoga").unwrap(), vec![yoga]),
        MatchResult::from_ranked(SourceTerm::new("zzzz").unwrap(), Vec::new()),
        MatchResult::failed(SourceTerm::new("Golf").unwrap(), "HTTP 500"),
    ];

    let out_dir = dir.path().join("out");
    let path = spreadsheet::export_results(&results, &out_dir, "meta_criteria_export_test").unwrap();
    assert_eq!(path, out_dir.join("meta_criteria_export_test.xlsx"));
    assert!(path.exists());

    // 出力したファイルを読み直して確認
    let sheet = spreadsheet::read_spreadsheet(&path).unwrap();
    assert_eq!(
        sheet.columns,
        vec![
            "Original Value",
            "Selected Interest",
            "Interest ID",
            "Audience Size",
            "Similarity Score",
            "Category Path",
            "Candidates",
            "Error",
        ]
    );
    assert_eq!(sheet.rows.len(), 3);

    let first = &sheet.rows[0];
    assert_eq!(first.get("Original Value"), Some(&CellValue::Text("Yoga".into())));
    assert_eq!(first.get("Selected Interest"), Some(&CellValue::Text("Yoga".into())));
    assert_eq!(first.get("Interest ID"), Some(&CellValue::Text("6003".into())));
    assert_eq!(first.get("Audience Size"), Some(&CellValue::Number(12_000.0)));
    assert_eq!(first.get("Similarity Score"), Some(&CellValue::Number(1.0)));
    assert_eq!(
        first.get("Category Path"),
        Some(&CellValue::Text("Interests > Fitness and wellness > Yoga".into()))
    );

    let unmatched = &sheet.rows[1];
    assert!(unmatched.get("Selected Interest").is_none());
    assert_eq!(unmatched.get("Candidates"), Some(&CellValue::Number(0.0)));

    let failed = &sheet.rows[2];
    assert_eq!(failed.get("Error"), Some(&CellValue::Text("HTTP 500".into())));
}

#[test]
fn test_export_empty_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = spreadsheet::export_results(&[], dir.path(), "empty").unwrap();
    assert!(path.exists());
}
