use std::sync::Arc;

use axum::{extract::State, Json};

use super::types::*;
use crate::api::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Search one file / 在单个文件内搜索
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> ApiResult<SearchResponse> {
    let results = state.searcher.search(&req.query, &req.file).await?;
    let total = results.len();
    Ok(Json(ApiResponse::success(SearchResponse { results, total })))
}
