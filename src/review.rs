//! 対話式の列選択・候補確認モジュール
//!
//! ## 変更履歴
//! - 2026-10-19: 初期作成

use crate::error::{MatcherError, Result};
use crate::report::{candidate_label, format_score, PLACEHOLDER};
use dialoguer::Select;
use interest_matcher_common::{set_selection, MatchResult, ParsedSheet};
use std::path::Path;

/// 照合対象の列を決める
///
/// 指定があれば存在チェック、なければ一覧から選択させる。
pub fn resolve_column(sheet: &ParsedSheet, column: Option<&str>) -> Result<String> {
    match column {
        Some(name) if sheet.has_column(name) => Ok(name.to_string()),
        Some(name) => Err(MatcherError::ColumnNotFound(name.to_string())),
        None => select_column_interactive(&sheet.columns),
    }
}

/// 列を対話式で選択
pub fn select_column_interactive(columns: &[String]) -> Result<String> {
    if columns.is_empty() {
        return Err(MatcherError::ColumnNotFound("（列がありません）".into()));
    }

    let index = Select::new()
        .with_prompt("検索語が入っている列を選択してください")
        .items(columns)
        .default(0)
        .interact()
        .map_err(|e| MatcherError::CliExecution(e.to_string()))?;

    Ok(columns[index].clone())
}

/// 候補が1件以上ある行（確認対象）
pub fn reviewable_rows(results: &[MatchResult]) -> Vec<usize> {
    results
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.candidates.is_empty())
        .map(|(i, _)| i)
        .collect()
}

/// 1行分の操作
enum ReviewAction {
    /// 候補を選択（candidates内の位置）
    Select(usize),
    /// 変更しない
    Keep,
    /// 残りを確認せず終了
    Quit,
}

/// 対話式で各行の候補を確認・変更
///
/// 入力のリストは変更せず、変更後のリストを返す。
pub fn run_interactive_review(results: &[MatchResult]) -> Result<Vec<MatchResult>> {
    let rows = reviewable_rows(results);
    let mut current = results.to_vec();

    if rows.is_empty() {
        println!("確認できる候補がありません");
        return Ok(current);
    }

    println!("🔎 候補の確認: {}件", rows.len());
    println!("---");
    println!("操作: [↑↓]移動 [Enter]決定 [Esc]変更しない");
    println!("---\n");

    for (count, &row) in rows.iter().enumerate() {
        let result = &current[row];
        println!(
            "[{}/{}] {} (選択中: {} {})",
            count + 1,
            rows.len(),
            result.source_term,
            result.selected.as_ref().map_or(PLACEHOLDER, |c| c.name.as_str()),
            format_score(result.selected.as_ref().and_then(|c| c.similarity_score)),
        );

        match prompt_review_action(result)? {
            ReviewAction::Select(index) => {
                let id = result.candidates[index].id.clone();
                let name = result.candidates[index].name.clone();
                current = set_selection(&current, row, &id)?;
                println!("  → {}\n", name);
            }
            ReviewAction::Keep => {
                println!("  → 変更なし\n");
            }
            ReviewAction::Quit => {
                println!("確認を終了します...");
                break;
            }
        }
    }

    Ok(current)
}

fn prompt_review_action(result: &MatchResult) -> Result<ReviewAction> {
    let mut items: Vec<String> = result.candidates.iter().map(candidate_label).collect();
    items.push("（残りを確認せず終了）".to_string());

    let choice = Select::new()
        .with_prompt("候補を選択")
        .items(&items)
        .default(result.selected_index().unwrap_or(0))
        .interact_opt()
        .map_err(|e| MatcherError::CliExecution(e.to_string()))?;

    Ok(match choice {
        Some(i) if i < result.candidates.len() => ReviewAction::Select(i),
        Some(_) => ReviewAction::Quit,
        None => ReviewAction::Keep,
    })
}

/// 結果JSONを読み込み、対話式で確認して保存
pub fn review_file(input_path: &Path, output_path: Option<&Path>) -> Result<()> {
    let results = load_results(input_path)?;
    let reviewed = run_interactive_review(&results)?;

    let output = output_path.unwrap_or(input_path);
    save_results(&reviewed, output)?;
    println!("\n✓ 保存しました: {}", output.display());

    Ok(())
}

/// 結果JSONの読み込み
///
/// 選択中の候補がその行の候補にない場合は選択なしに戻す。
pub fn load_results(path: &Path) -> Result<Vec<MatchResult>> {
    if !path.exists() {
        return Err(MatcherError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let mut results: Vec<MatchResult> = serde_json::from_str(&content)?;

    for (row, result) in results.iter_mut().enumerate() {
        if result.reconcile_selection() {
            tracing::warn!(
                row = row + 1,
                term = result.source_term.as_str(),
                "選択中の候補が候補一覧と一致しないため修正"
            );
        }
    }

    Ok(results)
}

/// 結果JSONの保存
pub fn save_results(results: &[MatchResult], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    Ok(())
}
