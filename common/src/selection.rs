//! 選択候補の変更
//!
//! 結果リストは直接書き換えず、変更後の新しいリストを返す。

use crate::error::{Error, Result};
use crate::types::MatchResult;

/// `row`行目の選択を`candidate_id`の候補に変更した新しいリストを返す
pub fn set_selection(
    results: &[MatchResult],
    row: usize,
    candidate_id: &str,
) -> Result<Vec<MatchResult>> {
    let target = results.get(row).ok_or(Error::RowOutOfRange {
        row,
        len: results.len(),
    })?;

    let candidate = target
        .candidates
        .iter()
        .find(|c| c.id == candidate_id)
        .cloned()
        .ok_or_else(|| Error::CandidateNotFound {
            row,
            id: candidate_id.to_string(),
        })?;

    let mut updated = results.to_vec();
    updated[row].selected = Some(candidate);
    Ok(updated)
}
