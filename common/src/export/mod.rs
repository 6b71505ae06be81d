//! 出力コア（レコード整形とXLSX生成）

pub mod layout;
pub mod records;

#[cfg(feature = "excel")]
pub mod excel_core;

pub use records::{prepare_export_records, ExportRecord, ExportValue};

#[cfg(feature = "excel")]
pub use excel_core::build_results_workbook;
