use std::sync::Arc;

use anyhow::{Context, Result};
use pdfsearch::config::AppConfig;
use pdfsearch::search::{PdfSearcher, SqliteIndex, TracingObserver};

/// Shared application state / 应用共享状态
pub struct AppState {
    pub searcher: PdfSearcher<SqliteIndex>,
}

impl AppState {
    pub fn new(searcher: PdfSearcher<SqliteIndex>) -> Self {
        Self { searcher }
    }
}

/// Open the configured index and wrap it in a searcher that logs progress
/// 打开索引数据库并创建搜索服务
pub async fn open_searcher(config: &AppConfig) -> Result<PdfSearcher<SqliteIndex>> {
    let index = SqliteIndex::open(&config.database)
        .await
        .with_context(|| format!("Failed to open index database {:?}", config.database.database_path()))?;

    Ok(PdfSearcher::new(index)
        .with_observer(Arc::new(TracingObserver))
        .with_options(config.index.clone()))
}
