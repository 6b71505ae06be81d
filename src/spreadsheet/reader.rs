//! Excel読み込み
//!
//! 先頭シートの1行目をヘッダーとして、各行を「列名 → 値」のマップにする。
//! 空のヘッダーは `__EMPTY`, `__EMPTY_1`...、重複ヘッダーは `_1`, `_2` を付ける。

use crate::error::{MatcherError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use interest_matcher_common::{CellValue, ParsedRow, ParsedSheet};
use regex::Regex;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

/// 対応拡張子の判定
pub fn is_supported_file_name(file_name: &str) -> bool {
    lazy_static::lazy_static! {
        static ref EXCEL_EXT: Regex = Regex::new(r"(?i)\.(xlsx|xls)$").unwrap();
    }
    EXCEL_EXT.is_match(file_name)
}

/// ファイルから読み込み
pub fn read_spreadsheet(path: &Path) -> Result<ParsedSheet> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    // 拡張子チェックはファイルを開く前に行う
    if !is_supported_file_name(&file_name) {
        return Err(MatcherError::UnsupportedExtension(file_name));
    }
    if !path.exists() {
        return Err(MatcherError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    read_spreadsheet_bytes(&file_name, bytes)
}

/// バイト列から読み込み（ファイル名は拡張子チェック用）
pub fn read_spreadsheet_bytes(file_name: &str, bytes: Vec<u8>) -> Result<ParsedSheet> {
    if !is_supported_file_name(file_name) {
        return Err(MatcherError::UnsupportedExtension(file_name.to_string()));
    }

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| MatcherError::FileFormat(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MatcherError::FileFormat("シートがありません".into()))?
        .map_err(|e| MatcherError::FileFormat(e.to_string()))?;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Ok(ParsedSheet::default());
    };

    let raw_headers: Vec<String> = header_row.iter().map(header_text).collect();
    let columns = unique_headers(&raw_headers);

    let mut rows = Vec::new();
    for row in rows_iter {
        let parsed: ParsedRow = row
            .iter()
            .zip(columns.iter())
            .filter_map(|(cell, column)| cell_value(cell).map(|v| (column.clone(), v)))
            .collect();

        // 空行はスキップ
        if !parsed.is_empty() {
            rows.push(parsed);
        }
    }

    tracing::debug!(rows = rows.len(), columns = columns.len(), "スプレッドシート読み込み完了");

    Ok(ParsedSheet { rows, columns })
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        _ => cell.to_string(),
    }
}

/// ヘッダー名を一意にする
fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut used: HashMap<String, usize> = HashMap::new();
    raw.iter()
        .map(|name| {
            let base = if name.is_empty() { "__EMPTY".to_string() } else { name.clone() };
            let count = used.entry(base.clone()).or_insert(0);
            let unique = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

/// セル値の変換（空セルはNone）
fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(n) => Some(CellValue::Number(*n as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        // 日付はExcelシリアル値のまま
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::Bool(b) => Some(CellValue::Text(b.to_string())),
        // ISO形式の日時・期間など
        other => Some(CellValue::Text(other.to_string())),
    }
}
