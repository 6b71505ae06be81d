//! プロキシ経由の検索クライアント

use super::{InterestSearch, SearchResponse};
use crate::error::{MatcherError, Result, DEFAULT_UPSTREAM_MESSAGE};
use async_trait::async_trait;
use interest_matcher_common::Candidate;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub struct ProxySearchClient {
    endpoint: String,
    client: Client,
}

impl ProxySearchClient {
    /// `proxy_url` はサーバーのベースURL（例: http://127.0.0.1:8080）
    pub fn new(proxy_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: format!("{}/search-proxy", proxy_url.trim_end_matches('/')),
            client,
        })
    }
}

#[async_trait]
impl InterestSearch for ProxySearchClient {
    async fn search(&self, term: &str) -> Result<Vec<Candidate>> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", term)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_UPSTREAM_MESSAGE)
                .to_string();
            return Err(MatcherError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.data)
    }
}
