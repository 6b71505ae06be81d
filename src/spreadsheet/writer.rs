//! Excel書き出し

use crate::error::{MatcherError, Result};
use interest_matcher_common::{
    build_results_workbook, prepare_export_records, ExportRecord, MatchResult,
};
use std::path::{Path, PathBuf};

/// 既定のファイル名（拡張子なし）: meta_criteria_export_YYYY-MM-DD_HHMM
pub fn default_export_stem() -> String {
    let now = chrono::Local::now();
    format!("meta_criteria_export_{}", now.format("%Y-%m-%d_%H%M"))
}

/// レコードを `<dir>/<stem>.xlsx` に書き出す
pub fn write_records(records: &[ExportRecord], output_dir: &Path, stem: &str) -> Result<PathBuf> {
    let buffer = build_results_workbook(records)
        .map_err(|e| MatcherError::ExcelGeneration(e.to_string()))?;

    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(format!("{}.xlsx", stem));
    std::fs::write(&output_path, buffer)?;

    tracing::debug!(path = %output_path.display(), rows = records.len(), "Excel出力");
    Ok(output_path)
}

/// 照合結果をExcelに書き出す
pub fn export_results(results: &[MatchResult], output_dir: &Path, stem: &str) -> Result<PathBuf> {
    write_records(&prepare_export_records(results), output_dir, stem)
}
