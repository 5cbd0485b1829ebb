//! Progress notifications / 进度通知
//!
//! Purely informational: observers never influence what gets stored or returned.

use serde::Serialize;

/// Checkpoints reported while indexing and searching / 索引与搜索过程中的事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    FileStarted { file: String },
    PageFound { page: i64 },
    PageIndexed { page: i64 },
    FileFinished { file: String, pages: usize },
    SearchStarted { query: String, file: String },
    SearchCompleted { count: usize },
    SearchHit { file: String, page: i64, content: String },
}

/// Sink for [`ProgressEvent`]s / 进度事件接收者
pub trait ProgressObserver: Send + Sync {
    fn notify(&self, event: &ProgressEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn notify(&self, _event: &ProgressEvent) {}
}

/// Forwards events to `tracing` / 输出到日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn notify(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::FileStarted { file } => tracing::info!("indexing {}", file),
            ProgressEvent::PageFound { page } => tracing::debug!("page {} found", page),
            ProgressEvent::PageIndexed { page } => tracing::debug!("page {} indexed", page),
            ProgressEvent::FileFinished { file, pages } => {
                tracing::info!("indexed {} ({} pages)", file, pages)
            }
            ProgressEvent::SearchStarted { query, file } => {
                tracing::info!("searching for: {} in {}", query, file)
            }
            ProgressEvent::SearchCompleted { count } => tracing::info!("found {} results", count),
            ProgressEvent::SearchHit { file, page, content } => {
                tracing::debug!("{} pp {}: {}", file, page, content)
            }
        }
    }
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn notify(&self, event: &ProgressEvent) {
        self(event)
    }
}
