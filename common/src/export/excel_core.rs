//! Excel生成（共通ライブラリ）
//!
//! 出力レコードを1シート（"Results"）のXLSXに書き出す

use super::layout::{width_for_label, SHEET_NAME};
use super::records::{ExportRecord, ExportValue};
use crate::error::{Error, Result};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};

fn excel_err(context: &str) -> impl Fn(XlsxError) -> Error + '_ {
    move |e| Error::Excel(format!("{}: {}", context, e))
}

/// 出力レコードからXLSXをバッファに生成
///
/// 1行目は先頭レコードの列ラベル。レコードが空なら空のシートのみ。
pub fn build_results_workbook(records: &[ExportRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));
    let integer_format = Format::new().set_num_format("#,##0");
    let percent_format = Format::new().set_num_format("0%");

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(excel_err("シート名設定エラー"))?;

    // ヘッダー行
    if let Some(first) = records.first() {
        for (col, label) in first.labels().enumerate() {
            let col = col as u16;
            worksheet
                .write_string_with_format(0, col, label, &header_format)
                .map_err(excel_err("ヘッダー書き込みエラー"))?;
            worksheet
                .set_column_width(col, width_for_label(label))
                .map_err(excel_err("列幅設定エラー"))?;
        }
        worksheet
            .set_freeze_panes(1, 0)
            .map_err(excel_err("ウィンドウ枠固定エラー"))?;
    }

    // データ行
    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, (_, value)) in record.fields.iter().enumerate() {
            let col = col as u16;
            let written = match value {
                ExportValue::Text(s) => worksheet.write_string(row, col, s).map(|_| ()),
                ExportValue::Integer(n) => worksheet
                    .write_number_with_format(row, col, *n as f64, &integer_format)
                    .map(|_| ()),
                ExportValue::Percent(p) => worksheet
                    .write_number_with_format(row, col, *p, &percent_format)
                    .map(|_| ()),
                ExportValue::Empty => Ok(()),
            };
            written.map_err(excel_err("値書き込みエラー"))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(excel_err("Excel保存エラー"))
}
