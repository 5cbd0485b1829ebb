//! Index store contract / 索引存储接口
//!
//! The searcher only needs these primitives; flow control (replace semantics,
//! canonicalization, progress) stays in [`super::PdfSearcher`].

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{IndexedFile, NewPageRecord, PageRecord};

#[async_trait]
pub trait PageStore: Send + Sync {
    /// Create a record, durable once this returns / 写入一页
    async fn put(&self, record: &NewPageRecord) -> Result<PageRecord>;

    /// Remove every record of `file`, returning how many were removed / 删除文件的全部页面
    async fn delete_file(&self, file: &str) -> Result<u64>;

    /// True iff at least one record exists for `file`
    async fn file_exists(&self, file: &str) -> Result<bool>;

    /// Distinct files with at least one record, sorted / 已索引文件列表
    async fn list_files(&self) -> Result<Vec<String>>;

    /// Distinct files with their page counts, sorted by file
    async fn file_summaries(&self) -> Result<Vec<IndexedFile>>;

    /// Records of `file` whose searchable content contains `canonical`,
    /// ordered by page then id / 按子串查找
    async fn find_by_substring(&self, file: &str, canonical: &str) -> Result<Vec<PageRecord>>;
}
