use super::AppState;
use crate::error::MatcherError;
use actix_web::error::QueryPayloadError;
use actix_web::{web, HttpRequest, HttpResponse};

/// クエリ文字列のペア（同名パラメータの重複を許す）
pub type QueryPairs = Vec<(String, String)>;

/// 同名パラメータが複数あれば先頭の値
pub fn first_param<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// 解析できないクエリ文字列も `{ "error": ... }` の400で返す
fn handle_query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "クエリ解析エラー");
    MatcherError::MissingParameter("q".into()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handle_query_error));
    cfg.service(
        web::resource("/search-proxy")
            .route(web::get().to(search_proxy))
            .route(web::method(actix_web::http::Method::OPTIONS).to(preflight)),
    );
}

/// GET /search-proxy?q=<term>
///
/// 成功時は検索APIのレスポンスをそのまま返す。
async fn search_proxy(
    state: web::Data<AppState>,
    query: web::Query<QueryPairs>,
) -> Result<HttpResponse, MatcherError> {
    let q = first_param(&query, "q")
        .filter(|q| !q.is_empty())
        .ok_or_else(|| MatcherError::MissingParameter("q".into()))?;

    let search = state.search.as_ref().ok_or(MatcherError::MissingAccessToken)?;

    match search.search_raw(q).await {
        Ok(body) => Ok(HttpResponse::Ok().json(body)),
        Err(e) => {
            tracing::error!(query = q, error = %e, "検索APIへのリクエスト失敗");
            Err(e)
        }
    }
}

/// OPTIONS /search-proxy
async fn preflight() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({}))
}
