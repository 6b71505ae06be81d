//! インタレスト検索
//!
//! - graph: 検索APIへ直接問い合わせ（アクセストークンを保持）
//! - proxy: `/search-proxy` 経由で問い合わせ

pub mod graph;
pub mod proxy;

pub use graph::GraphSearchClient;
pub use proxy::ProxySearchClient;

use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use interest_matcher_common::Candidate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 検索レスポンス `{ data: [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Candidate>,
}

/// 検索語からインタレスト候補を取得する
#[async_trait]
pub trait InterestSearch: Send + Sync {
    /// 空白のみの語はリクエストせず空リストを返す
    async fn search(&self, term: &str) -> Result<Vec<Candidate>>;
}

/// 設定から検索クライアントを選ぶ
///
/// プロキシURLがあればプロキシ経由、なければアクセストークンで直接。
pub fn build_search(config: &Config, proxy_url: Option<&str>) -> Result<Box<dyn InterestSearch>> {
    let timeout = Duration::from_secs(config.timeout_seconds);

    match proxy_url.or(config.proxy_url.as_deref()) {
        Some(url) => {
            tracing::info!(proxy = url, "プロキシ経由で検索");
            Ok(Box::new(ProxySearchClient::new(url, timeout)?))
        }
        None => {
            let token = config.require_access_token()?;
            Ok(Box::new(GraphSearchClient::new(
                &config.api_base_url,
                token,
                config.search_limit,
                timeout,
            )?))
        }
    }
}
