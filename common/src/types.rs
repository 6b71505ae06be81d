//! 照合データの型定義
//!
//! CLIとプロキシサーバーで共有される型:
//! - Candidate: 検索APIが返すインタレスト候補
//! - SourceTerm: スプレッドシート列から抽出した検索語
//! - MatchResult: 検索語ごとの照合結果（ランキング済み候補 + 選択中の候補）
//! - CellValue / ParsedRow / ParsedSheet: 読み込んだスプレッドシートの行

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// インタレスト候補（検索APIの1件）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    pub name: String,

    /// オーディエンスサイズ（APIが返さない場合あり）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_size: Option<u64>,

    /// カテゴリ階層
    #[serde(default, deserialize_with = "deserialize_path")]
    pub path: Vec<String>,

    /// 類似度スコア（ランキング時のみ設定）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_audience(mut self, audience_size: u64) -> Self {
        self.audience_size = Some(audience_size);
        self
    }

    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }
}

/// IDは文字列・数値どちらでも受け付ける
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// `path: null` は空扱い
fn deserialize_path<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// 検索語（前後空白除去済み・空文字なし）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTerm(String);

impl SourceTerm {
    /// trimして空ならNone
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SourceTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 検索語ごとの照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub source_term: SourceTerm,

    /// ランキング済み候補
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// 選択中の候補（candidatesのいずれか）
    #[serde(default)]
    pub selected: Option<Candidate>,

    /// 検索失敗時のメッセージ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatchResult {
    /// ランキング済み候補から結果を作成（先頭を選択）
    pub fn from_ranked(source_term: SourceTerm, ranked: Vec<Candidate>) -> Self {
        let selected = crate::ranker::select_best(source_term.as_str(), &ranked).cloned();
        Self {
            source_term,
            candidates: ranked,
            selected,
            error: None,
        }
    }

    /// 検索失敗時のプレースホルダ行
    pub fn failed(source_term: SourceTerm, message: impl Into<String>) -> Self {
        Self {
            source_term,
            candidates: Vec::new(),
            selected: None,
            error: Some(message.into()),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|c| c.id.as_str())
    }

    /// 選択中の候補のcandidates内での位置
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id()?;
        self.candidates.iter().position(|c| c.id == id)
    }

    /// 選択をcandidates内の同じIDの候補に合わせ直す
    ///
    /// 見つからなければ選択なしにする。変更があればtrue。
    pub fn reconcile_selection(&mut self) -> bool {
        let resolved = self.selected_index().map(|i| self.candidates[i].clone());
        if resolved == self.selected {
            return false;
        }
        self.selected = resolved;
        true
    }
}

/// セル値（文字列または数値）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// 空値判定（空文字・0・NaNは空扱い）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }

    /// 検索語として使う文字列表現
    pub fn as_term_text(&self) -> String {
        if self.is_blank() {
            return String::new();
        }
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// 1行分（列名 → 値）
pub type ParsedRow = HashMap<String, CellValue>;

/// 読み込んだシート
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSheet {
    pub rows: Vec<ParsedRow>,
    /// 列名（1行目の出現順）
    pub columns: Vec<String>,
}

impl ParsedSheet {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}
