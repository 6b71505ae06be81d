//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Row out of range: {row} (rows: {len})")]
    RowOutOfRange { row: usize, len: usize },

    #[error("Candidate not found in row {row}: {id}")]
    CandidateNotFound { row: usize, id: String },

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
