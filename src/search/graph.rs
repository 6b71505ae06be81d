//! 検索API（adinterest）クライアント

use super::{InterestSearch, SearchResponse};
use crate::error::{MatcherError, Result, DEFAULT_UPSTREAM_MESSAGE};
use async_trait::async_trait;
use interest_matcher_common::Candidate;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// 検索タイプ
const SEARCH_TYPE: &str = "adinterest";

pub struct GraphSearchClient {
    base_url: String,
    access_token: String,
    limit: u32,
    client: Client,
}

impl GraphSearchClient {
    pub fn new(
        base_url: &str,
        access_token: String,
        limit: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            limit,
            client,
        })
    }

    /// 検索APIのレスポンスJSONをそのまま返す
    pub async fn search_raw(&self, query: &str) -> Result<Value> {
        let url = format!("{}/search", self.base_url);
        let limit = self.limit.to_string();

        tracing::debug!(query, "検索API呼び出し");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("type", SEARCH_TYPE),
                ("limit", limit.as_str()),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = upstream_error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "検索APIエラー");
            return Err(MatcherError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// エラーレスポンス `{ error: { message } }` からメッセージを取り出す
pub fn upstream_error_message(body: &Value) -> String {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_UPSTREAM_MESSAGE)
        .to_string()
}

#[async_trait]
impl InterestSearch for GraphSearchClient {
    async fn search(&self, term: &str) -> Result<Vec<Candidate>> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        let body = self.search_raw(term).await?;
        let parsed: SearchResponse = serde_json::from_value(body)?;
        Ok(parsed.data)
    }
}
