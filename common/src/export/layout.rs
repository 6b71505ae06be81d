//! 出力シートのレイアウト定義

/// 出力シート名
pub const SHEET_NAME: &str = "Results";

/// 出力列定義
#[derive(Debug, Clone, Copy)]
pub struct ExportField {
    pub key: &'static str,
    pub label: &'static str,
    /// 列幅（Excel文字数単位）
    pub width: f64,
}

/// 出力列（この順で並ぶ）
pub const EXPORT_FIELDS: &[ExportField] = &[
    ExportField { key: "sourceTerm", label: "Original Value", width: 28.0 },
    ExportField { key: "selectedName", label: "Selected Interest", width: 32.0 },
    ExportField { key: "selectedId", label: "Interest ID", width: 18.0 },
    ExportField { key: "audienceSize", label: "Audience Size", width: 16.0 },
    ExportField { key: "similarityScore", label: "Similarity Score", width: 16.0 },
    ExportField { key: "path", label: "Category Path", width: 48.0 },
    ExportField { key: "candidateCount", label: "Candidates", width: 12.0 },
    ExportField { key: "error", label: "Error", width: 40.0 },
];

/// パスの区切り
pub const PATH_SEPARATOR: &str = " > ";

/// ラベルから列幅を取得（未定義は既定幅）
pub fn width_for_label(label: &str) -> f64 {
    EXPORT_FIELDS
        .iter()
        .find(|f| f.label == label)
        .map(|f| f.width)
        .unwrap_or(16.0)
}
