pub mod search;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pdfsearch::IndexError;
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// API response envelope / API响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

/// Index errors rendered as an error envelope / 索引错误转换为HTTP响应
pub struct ApiError(pub IndexError);

impl From<IndexError> for ApiError {
    fn from(err: IndexError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            IndexError::FileNotFound(_) => StatusCode::NOT_FOUND,
            IndexError::OutsideSourceRoot { .. } => StatusCode::FORBIDDEN,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(ApiResponse::<()>::error(&self.0.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// CORS for the configured origins only; an empty list sends no CORS headers
/// 仅允许配置的跨域来源
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) if origin != "*" => Some(value),
            _ => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/files", get(search::list_files))
        .route("/api/files/status", get(search::file_status))
        .route("/api/index", post(search::index_file))
        .route("/api/remove", post(search::remove_file))
        .route("/api/search", post(search::search))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use pdfsearch::config::IndexConfig;
    use pdfsearch::search::{PdfSearcher, SqliteIndex};
    use serde_json::{json, Value};
    use std::io::Write;
    use tower::ServiceExt;

    async fn app() -> Router {
        let searcher = PdfSearcher::new(SqliteIndex::in_memory().await.unwrap());
        router(Arc::new(AppState::new(searcher)), &[])
    }

    async fn rooted_app(root: &std::path::Path, origins: &[String]) -> Router {
        let searcher = PdfSearcher::new(SqliteIndex::in_memory().await.unwrap()).with_options(IndexConfig {
            source_root: Some(root.to_string_lossy().into_owned()),
            ..IndexConfig::default()
        });
        router(Arc::new(AppState::new(searcher)), origins)
    }

    async fn preflight(app: &Router, origin: &str) -> Option<HeaderValue> {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/index")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).cloned()
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn source(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        std::fs::File::create(&path).unwrap().write_all(content.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_index_then_search() {
        let app = app().await;
        let dir = tempfile::tempdir().unwrap();
        let file = source(&dir, "book.txt", "START OF PAGE 107\nAño tras año\nEND OF PAGE 107\n");

        let (status, body) = call(&app, "POST", "/api/index", Some(json!({ "file": file }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["pages"], 1);

        let (status, body) = call(&app, "POST", "/api/search", Some(json!({ "query": "TRAS-ANO", "file": file }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["results"][0]["page"], 107);
        assert_eq!(body["data"]["results"][0]["original_content"], "Año tras año\n");
        assert_eq!(body["data"]["results"][0]["file"], file);

        let (_, body) = call(&app, "GET", "/api/files", None).await;
        assert_eq!(body["data"][0]["file"], file);
        assert_eq!(body["data"][0]["page_count"], 1);

        let uri = format!("/api/files/status?file={}", file);
        let (_, body) = call(&app, "GET", &uri, None).await;
        assert_eq!(body["data"]["indexed"], true);

        let (_, body) = call(&app, "POST", "/api/remove", Some(json!({ "file": file }))).await;
        assert_eq!(body["data"]["removed"], 1);
        let (_, body) = call(&app, "GET", &uri, None).await;
        assert_eq!(body["data"]["indexed"], false);
    }

    #[tokio::test]
    async fn test_error_status_codes() {
        let app = app().await;
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = call(&app, "POST", "/api/index", Some(json!({ "file": "book.pdf" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let missing = dir.path().join("gone.txt").to_string_lossy().into_owned();
        let (status, _) = call(&app, "POST", "/api/index", Some(json!({ "file": missing }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let bad = source(&dir, "bad.txt", "START OF PAGE nine\n");
        let (status, body) = call(&app, "POST", "/api/index", Some(json!({ "file": bad }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("line 1"));
    }

    #[tokio::test]
    async fn test_cross_origin_only_for_configured_origins() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(preflight(&app().await, "https://evil.example").await, None);

        let app = rooted_app(dir.path(), &["http://localhost:3000".to_string()]).await;
        assert_eq!(preflight(&app, "https://evil.example").await, None);
        assert_eq!(
            preflight(&app, "http://localhost:3000").await,
            Some(HeaderValue::from_static("http://localhost:3000"))
        );
    }

    #[tokio::test]
    async fn test_index_outside_source_root_is_forbidden() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("books")).unwrap();
        let secret = source(&dir, "secret.txt", "START OF PAGE 1
hunter2
END OF PAGE 1
");
        let app = rooted_app(&dir.path().join("books"), &[]).await;

        let (status, body) = call(&app, "POST", "/api/index", Some(json!({ "file": secret }))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);

        let (_, body) = call(&app, "POST", "/api/search", Some(json!({ "query": "hunter2", "file": secret }))).await;
        assert_eq!(body["data"]["total"], 0);

        let inside = source(&dir, "books/ok.txt", "START OF PAGE 1
fine
END OF PAGE 1
");
        let (status, _) = call(&app, "POST", "/api/index", Some(json!({ "file": inside }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_unknown_file_is_empty() {
        let app = app().await;
        let (status, body) = call(&app, "POST", "/api/search", Some(json!({ "query": "all", "file": "testa.pdf" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 0);
    }
}
