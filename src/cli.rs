use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interest-matcher")]
#[command(about = "スプレッドシートの値をMeta広告インタレストに照合するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スプレッドシートの列一覧を表示
    Columns {
        /// Excelファイル (.xlsx/.xls)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 列の値を検索・照合して結果JSONを出力
    Match {
        /// Excelファイル (.xlsx/.xls)
        #[arg(required = true)]
        file: PathBuf,

        /// 照合する列（省略時は選択）
        #[arg(short, long)]
        column: Option<String>,

        /// 出力JSONファイル（デフォルト: results.json）
        #[arg(short, long, default_value = "results.json")]
        output: PathBuf,

        /// プロキシサーバー経由で検索（例: http://localhost:8080）
        #[arg(long)]
        proxy: Option<String>,
    },

    /// 結果JSONの候補を対話的に確認・変更
    Review {
        /// 結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力先（省略時は上書き）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 指定行の選択候補を変更
    Select {
        /// 結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 行番号（1始まり）
        #[arg(long)]
        row: usize,

        /// 選択するインタレストID
        #[arg(long)]
        id: String,

        /// 出力先（省略時は上書き）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 結果JSONからExcelを出力
    Export {
        /// 結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ディレクトリ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// ファイル名（拡張子なし、省略時は日時から生成）
        #[arg(long)]
        name: Option<String>,
    },

    /// 照合からExcel出力まで一括実行
    Run {
        /// Excelファイル (.xlsx/.xls)
        #[arg(required = true)]
        file: PathBuf,

        /// 照合する列（省略時は選択）
        #[arg(short, long)]
        column: Option<String>,

        /// 出力ディレクトリ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// プロキシサーバー経由で検索
        #[arg(long)]
        proxy: Option<String>,

        /// 出力前に候補を対話的に確認
        #[arg(long)]
        review: bool,
    },

    /// 1語を検索してランキングを表示
    Search {
        /// 検索語
        #[arg(required = true)]
        term: String,

        /// プロキシサーバー経由で検索
        #[arg(long)]
        proxy: Option<String>,
    },

    /// 検索プロキシサーバーを起動
    Serve {
        /// バインドするホスト（省略時は設定値）
        #[arg(long)]
        host: Option<String>,

        /// ポート番号（省略時は設定値）
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 設定を表示/編集
    Config {
        /// アクセストークンを設定
        #[arg(long)]
        set_access_token: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
