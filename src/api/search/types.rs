use pdfsearch::PageRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub file: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<PageRecord>,
    pub total: usize,
}

/// Request naming a single indexed file / 指定文件的请求
#[derive(Debug, Deserialize)]
pub struct FileRequest {
    pub file: String,
}

#[derive(Debug, Serialize)]
pub struct FileStatus {
    pub file: String,
    pub indexed: bool,
}

#[derive(Debug, Serialize)]
pub struct IndexResult {
    pub file: String,
    pub pages: usize,
}

#[derive(Debug, Serialize)]
pub struct RemoveResult {
    pub file: String,
    pub removed: u64,
}
