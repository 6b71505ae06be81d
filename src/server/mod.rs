//! 検索APIプロキシサーバー
//!
//! `GET /search-proxy?q=<term>` をアクセストークン付きで検索APIに中継する。
//! トークンはサーバー側だけが保持する。

pub mod routes;

use crate::config::Config;
use crate::error::{MatcherError, Result};
use crate::search::GraphSearchClient;
use actix_cors::Cors;
use actix_web::http::{header, StatusCode};
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError};
use std::sync::Arc;
use std::time::Duration;

/// ハンドラ間で共有する状態
#[derive(Clone)]
pub struct AppState {
    /// トークン未設定ならNone（リクエスト時に500を返す）
    pub search: Option<Arc<GraphSearchClient>>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let search = match config.access_token() {
            Some(token) => Some(Arc::new(GraphSearchClient::new(
                &config.api_base_url,
                token,
                config.search_limit,
                Duration::from_secs(config.timeout_seconds),
            )?)),
            None => {
                tracing::warn!("アクセストークン未設定: /search-proxy は500を返します");
                None
            }
        };
        Ok(Self { search })
    }
}

impl ResponseError for MatcherError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.client_message() }))
    }
}

/// プロキシ用のCORS設定（リクエスト元オリジンをそのまま許可）
///
/// OPTIONS はミドルウェアで処理せずルートの `preflight` に渡す。
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .disable_preflight()
}

/// 全レスポンスに付けるCORSヘッダー（メソッド・ヘッダーの許可）
pub fn cors_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, PUT, DELETE, OPTIONS"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"))
}

/// サーバーを起動（終了まで戻らない）
pub async fn run(config: &Config, host: &str, port: u16) -> std::io::Result<()> {
    let state = AppState::from_config(config)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    tracing::info!("Starting search proxy on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors())
            .wrap(cors_headers())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
