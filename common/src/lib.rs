//! Interest Matcher Common Library
//!
//! CLIとプロキシサーバーで共有される型とユーティリティ

pub mod types;
pub mod ranker;
pub mod terms;
pub mod selection;
pub mod export;
pub mod error;

pub use types::{Candidate, CellValue, MatchResult, ParsedRow, ParsedSheet, SourceTerm};
pub use ranker::{rank, select_best, similarity};
pub use terms::collect_unique_terms;
pub use selection::set_selection;
pub use export::{prepare_export_records, ExportRecord, ExportValue};
pub use error::{Error, Result};

#[cfg(feature = "excel")]
pub use export::build_results_workbook;
