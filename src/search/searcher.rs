//! Page search service / 页面搜索服务
//!
//! Indexing is a full replace: every page of a file is deleted before the
//! new stream is read, then pages are written one by one as they close.
//! Pages flushed before a parse error stay committed.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use super::observer::{NoopObserver, ProgressEvent, ProgressObserver};
use super::parser::{PageEvent, PageParser};
use super::store::PageStore;
use super::tokenizer::canonicalize;
use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::models::{IndexedFile, NewPageRecord, PageRecord};

/// Indexes page-marked text files and searches them one file at a time
/// 索引分页文本并按文件搜索
pub struct PdfSearcher<S> {
    store: S,
    observer: Arc<dyn ProgressObserver>,
    options: IndexConfig,
    /// serializes delete-then-insert sequences / 写入串行化
    write_gate: Mutex<()>,
}

impl<S: PageStore> PdfSearcher<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            observer: Arc::new(NoopObserver),
            options: IndexConfig::default(),
            write_gate: Mutex::new(()),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_options(mut self, options: IndexConfig) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn emit(&self, event: ProgressEvent) {
        self.observer.notify(&event);
    }

    /// Check the file key and source path before anything is deleted,
    /// returning the path to read
    fn validate_source(&self, file: &str) -> Result<PathBuf> {
        let expected = self.options.allowed_extension.trim_start_matches('.');
        let has_extension = Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == expected);
        if !has_extension {
            return Err(IndexError::InvalidFileKey {
                file: file.to_string(),
                expected: expected.to_string(),
            });
        }

        let path = Path::new(file);
        if !path.is_file() {
            return Err(IndexError::FileNotFound(path.to_path_buf()));
        }

        let Some(root) = &self.options.source_root else {
            return Ok(path.to_path_buf());
        };
        // both sides resolved so `..` and symlinks cannot leave the root
        let root = std::fs::canonicalize(root)?;
        let resolved = path.canonicalize()?;
        if !resolved.starts_with(&root) {
            tracing::warn!("Refusing to index {} outside {}", file, root.display());
            return Err(IndexError::OutsideSourceRoot {
                file: file.to_string(),
                root,
            });
        }
        Ok(resolved)
    }

    /// Replace the index of `file` with its current contents, returning the number of pages stored
    /// 全量重建单个文件的索引
    pub async fn index_txt_file(&self, file: &str) -> Result<usize> {
        let source = self.validate_source(file)?;

        let _guard = self.write_gate.lock().await;

        let removed = self.store.delete_file(file).await?;
        if removed > 0 {
            tracing::debug!("Removed {} stale pages of {}", removed, file);
        }

        let handle = File::open(&source)?;
        let parser = PageParser::new(BufReader::new(handle))
            .flush_trailing_page(self.options.flush_trailing_page);

        self.emit(ProgressEvent::FileStarted {
            file: file.to_string(),
        });

        let mut indexed = 0;
        for event in parser {
            match event? {
                PageEvent::PageStarted(page) => self.emit(ProgressEvent::PageFound { page }),
                PageEvent::PageCompleted { page, content } => {
                    self.store
                        .put(&NewPageRecord::new(file, page, content))
                        .await?;
                    indexed += 1;
                    self.emit(ProgressEvent::PageIndexed { page });
                }
            }
        }

        self.emit(ProgressEvent::FileFinished {
            file: file.to_string(),
            pages: indexed,
        });
        Ok(indexed)
    }

    /// Pages of `file` containing `query`, compared in canonical form, ordered by page
    /// 在单个文件内搜索
    pub async fn search(&self, query: &str, file: &str) -> Result<Vec<PageRecord>> {
        self.emit(ProgressEvent::SearchStarted {
            query: query.to_string(),
            file: file.to_string(),
        });

        let canonical = canonicalize(query);
        let results = if canonical.is_empty() {
            // would match every page
            tracing::debug!("Query {:?} has no searchable characters", query);
            Vec::new()
        } else {
            self.store.find_by_substring(file, &canonical).await?
        };

        self.emit(ProgressEvent::SearchCompleted {
            count: results.len(),
        });
        for r in &results {
            self.emit(ProgressEvent::SearchHit {
                file: r.file.clone(),
                page: r.page,
                content: r.original_content.clone(),
            });
        }

        Ok(results)
    }

    /// Files with at least one indexed page, sorted / 已索引文件
    pub async fn indexed_files(&self) -> Result<Vec<String>> {
        self.store.list_files().await
    }

    pub async fn is_indexed(&self, file: &str) -> Result<bool> {
        self.store.file_exists(file).await
    }

    pub async fn file_summaries(&self) -> Result<Vec<IndexedFile>> {
        self.store.file_summaries().await
    }

    /// Drop every page of `file` from the index / 删除文件索引
    pub async fn remove_file(&self, file: &str) -> Result<u64> {
        let _guard = self.write_gate.lock().await;
        let removed = self.store.delete_file(file).await?;
        tracing::info!("Removed {} pages of {}", removed, file);
        Ok(removed)
    }
}
