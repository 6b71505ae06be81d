use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// アクセストークンを上書きする環境変数
pub const ACCESS_TOKEN_ENV: &str = "META_ACCESS_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub access_token: Option<String>,
    pub api_base_url: String,
    pub search_limit: u32,
    pub timeout_seconds: u64,
    /// 照合時に経由するプロキシ（未設定なら検索APIへ直接）
    pub proxy_url: Option<String>,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base_url: "https://graph.facebook.com/v18.0".into(),
            search_limit: 10,
            timeout_seconds: 30,
            proxy_url: None,
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（ファイルがなければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MatcherError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("interest-matcher").join("config.json"))
    }

    /// アクセストークン（環境変数を優先）
    pub fn access_token(&self) -> Option<String> {
        std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| self.access_token.clone())
            .filter(|token| !token.trim().is_empty())
    }

    pub fn require_access_token(&self) -> Result<String> {
        self.access_token().ok_or(MatcherError::MissingAccessToken)
    }

    pub fn set_access_token(&mut self, token: String) -> Result<()> {
        self.access_token = Some(token);
        self.save()
    }
}
