//! スプレッドシート入出力
//!
//! - reader: アップロードされたExcelを行レコードに変換（calamine）
//! - writer: 照合結果をExcelに書き出し

pub mod reader;
pub mod writer;

pub use reader::{is_supported_file_name, read_spreadsheet, read_spreadsheet_bytes};
pub use writer::{default_export_stem, export_results, write_records};
