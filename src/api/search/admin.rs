use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use pdfsearch::IndexedFile;

use super::types::*;
use crate::api::{ApiResponse, ApiResult};
use crate::state::AppState;

/// List indexed files with page counts / 已索引文件列表
pub async fn list_files(State(state): State<Arc<AppState>>) -> ApiResult<Vec<IndexedFile>> {
    let files = state.searcher.file_summaries().await?;
    Ok(Json(ApiResponse::success(files)))
}

pub async fn file_status(
    State(state): State<Arc<AppState>>,
    Query(req): Query<FileRequest>,
) -> ApiResult<FileStatus> {
    let indexed = state.searcher.is_indexed(&req.file).await?;
    Ok(Json(ApiResponse::success(FileStatus {
        file: req.file,
        indexed,
    })))
}

/// (Re)build the index of one source file / 重建单个文件索引
pub async fn index_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FileRequest>,
) -> ApiResult<IndexResult> {
    let pages = state.searcher.index_txt_file(&req.file).await?;
    Ok(Json(ApiResponse::success(IndexResult {
        file: req.file,
        pages,
    })))
}

pub async fn remove_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FileRequest>,
) -> ApiResult<RemoveResult> {
    let removed = state.searcher.remove_file(&req.file).await?;
    Ok(Json(ApiResponse::success(RemoveResult {
        file: req.file,
        removed,
    })))
}
