//! interest-matcher
//!
//! スプレッドシートの列の値を広告インタレストに照合し、
//! 最も近い候補を付与したExcelを出力する。

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod review;
pub mod search;
pub mod server;
pub mod spreadsheet;

pub use error::{MatcherError, Result};
