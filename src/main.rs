use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use interest_matcher::{cli, config, error, pipeline, report, review, search, server, spreadsheet};
use interest_matcher_common::{collect_unique_terms, rank, set_selection, MatchResult};
use cli::{Cli, Commands};
use config::Config;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = Config::load()?;

    match cli.command {
        Commands::Columns { file } => {
            let sheet = spreadsheet::read_spreadsheet(&file)?;
            println!("列一覧 ({}行):", sheet.rows.len());
            for (i, column) in sheet.columns.iter().enumerate() {
                println!("  {:>2}. {}", i + 1, column);
            }
        }

        Commands::Match { file, column, output, proxy } => {
            println!("🔎 interest-matcher - 照合\n");

            let results = match_file(&config, &file, column.as_deref(), proxy.as_deref()).await?;

            println!("[3/3] 結果を保存中...");
            review::save_results(&results, &output)?;
            println!("✔ 結果を保存: {}\n", output.display());

            report::print_results(&results);
            print_summary(&results);
        }

        Commands::Review { input, output } => {
            review::review_file(&input, output.as_deref())?;
        }

        Commands::Select { input, row, id, output } => {
            let results = review::load_results(&input)?;
            let index = row
                .checked_sub(1)
                .ok_or_else(|| error::MatcherError::CliExecution("行番号は1から指定してください".into()))?;

            let updated = set_selection(&results, index, &id)?;
            let output = output.unwrap_or(input);
            review::save_results(&updated, &output)?;

            if let Some(selected) = &updated[index].selected {
                println!("✔ {}行目: {} → {}", row, updated[index].source_term, selected.name);
            }
            println!("✔ 保存しました: {}", output.display());
        }

        Commands::Export { input, output, name } => {
            println!("📄 interest-matcher - エクスポート\n");

            let results = review::load_results(&input)?;
            let stem = name.unwrap_or_else(spreadsheet::default_export_stem);
            let path = spreadsheet::export_results(&results, &output, &stem)?;

            println!("✔ Excel出力: {}", path.display());
            println!("\n✅ エクスポート完了");
        }

        Commands::Run { file, column, output, proxy, review: with_review } => {
            println!("🚀 interest-matcher - 一括処理\n");

            let results = match_file(&config, &file, column.as_deref(), proxy.as_deref()).await?;
            report::print_results(&results);
            println!();

            let results = if with_review {
                review::run_interactive_review(&results)?
            } else {
                results
            };

            println!("[3/3] エクスポート中...");
            let path = spreadsheet::export_results(
                &results,
                &output,
                &spreadsheet::default_export_stem(),
            )?;
            println!("✔ Excel出力: {}", path.display());

            print_summary(&results);
            println!("\n✅ 完了");
        }

        Commands::Search { term, proxy } => {
            let client = search::build_search(&config, proxy.as_deref())?;
            let candidates = client.search(&term).await?;
            let ranked = rank(&term, &candidates);

            if ranked.is_empty() {
                println!("候補が見つかりませんでした: {}", term);
            }
            for (i, candidate) in ranked.iter().enumerate() {
                let marker = if i == 0 { "★" } else { " " };
                println!("{} {:>2}. {}  (ID: {})", marker, i + 1, report::candidate_label(candidate), candidate.id);
            }
        }

        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            server::run(&config, &host, port)
                .await
                .with_context(|| format!("サーバーを起動できません: {}:{}", host, port))?;
        }

        Commands::Config { set_access_token, show } => {
            let mut config = config;

            if let Some(token) = set_access_token {
                config.set_access_token(token)?;
                println!("✔ アクセストークンを設定しました");
            }

            if show {
                println!("設定:");
                println!("  ファイル: {}", Config::config_path()?.display());
                println!("  検索API: {}", config.api_base_url);
                println!("  取得件数: {}", config.search_limit);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  プロキシ: {}", config.proxy_url.as_deref().unwrap_or("未設定"));
                println!("  サーバー: {}:{}", config.server.host, config.server.port);
                println!(
                    "  アクセストークン: {}",
                    if config.access_token().is_some() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}

/// ログ初期化（RUST_LOG が優先）
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if matches!(cli.command, Commands::Serve { .. }) {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// 読み込み → 列選択 → 検索語抽出 → 検索・ランキング
///
/// スプレッドシートとトークンの検証はAPI呼び出しより前に行う。
async fn match_file(
    config: &Config,
    file: &Path,
    column: Option<&str>,
    proxy: Option<&str>,
) -> Result<Vec<MatchResult>> {
    println!("[1/3] スプレッドシートを読み込み中...");
    let sheet = spreadsheet::read_spreadsheet(file)?;
    let column = review::resolve_column(&sheet, column)?;
    let terms = collect_unique_terms(&sheet.rows, &column);
    println!("✔ {}行 / 列「{}」から{}語を抽出\n", sheet.rows.len(), column, terms.len());

    if terms.is_empty() {
        println!("照合する値がありません");
        return Ok(Vec::new());
    }

    let client = search::build_search(config, proxy)?;

    println!("[2/3] インタレストを検索中...");
    let pb = ProgressBar::new(terms.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  検索 [{bar:30}] {pos}/{len} {msg}")?,
    );

    // 表示は検索中の語
    if let Some(first) = terms.first() {
        pb.set_message(first.to_string());
    }

    let mut results = Vec::with_capacity(terms.len());
    let mut outcomes = Box::pin(pipeline::resolve_terms(client.as_ref(), terms));
    while let Some(outcome) = outcomes.next().await {
        if let Some(next) = &outcome.next_term {
            pb.set_message(next.to_string());
        }
        pb.inc(1);
        results.push(outcome.result);
    }
    pb.finish_and_clear();
    println!("✔ 検索完了\n");

    Ok(results)
}

fn print_summary(results: &[MatchResult]) {
    let (matched, unmatched, failed) = report::summarize(results);
    println!("\n一致: {} / 候補なし: {} / エラー: {}", matched, unmatched, failed);
}
