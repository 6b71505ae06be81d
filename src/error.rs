use thiserror::Error;

/// 上流APIエラー時の既定メッセージ
pub const DEFAULT_UPSTREAM_MESSAGE: &str = "検索APIとの通信中にエラーが発生しました";

/// プロキシ側でトークン未設定の場合のメッセージ
pub const SERVER_TOKEN_MISSING_MESSAGE: &str = "サーバーにアクセストークンが設定されていません";

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("クエリパラメータ \"{0}\" は必須です")]
    MissingParameter(String),

    #[error("アクセストークンが設定されていません。`interest-matcher config --set-access-token TOKEN` または環境変数 META_ACCESS_TOKEN で設定してください")]
    MissingAccessToken,

    #[error("検索APIエラー ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("対応していないファイル形式です。Excelファイル (.xlsx, .xls) を指定してください: {0}")]
    UnsupportedExtension(String),

    #[error("スプレッドシートを読み込めません: {0}")]
    FileFormat(String),

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] interest_matcher_common::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

impl MatcherError {
    /// HTTPステータスへの対応
    pub fn http_status(&self) -> u16 {
        match self {
            MatcherError::MissingParameter(_) => 400,
            MatcherError::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    /// プロキシのレスポンスに載せるメッセージ
    ///
    /// 上流エラーは上流のメッセージをそのまま転送する。
    pub fn client_message(&self) -> String {
        match self {
            MatcherError::Upstream { message, .. } => message.clone(),
            MatcherError::Http(_) => DEFAULT_UPSTREAM_MESSAGE.to_string(),
            MatcherError::MissingAccessToken => SERVER_TOKEN_MISSING_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;
