//! In-memory page store / 内存页面存储
//!
//! Same contract as the SQLite index, kept in process memory. Useful for tests
//! and one-shot runs where nothing needs to survive the process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::store::PageStore;
use crate::error::Result;
use crate::models::{IndexedFile, NewPageRecord, PageRecord};

#[derive(Debug, Default)]
struct MemoryState {
    /// file -> pages in insertion order / 文件 -> 页面
    files: BTreeMap<String, Vec<PageRecord>>,
    next_id: i64,
}

/// In-memory store / 内存存储
#[derive(Debug, Default)]
pub struct MemoryIndex {
    state: RwLock<MemoryState>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored pages / 页面总数
    pub fn page_count(&self) -> usize {
        self.state.read().files.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl PageStore for MemoryIndex {
    async fn put(&self, record: &NewPageRecord) -> Result<PageRecord> {
        let mut state = self.state.write();
        state.next_id += 1;
        let stored = record.clone().into_record(state.next_id);
        state
            .files
            .entry(stored.file.clone())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn delete_file(&self, file: &str) -> Result<u64> {
        let removed = self.state.write().files.remove(file);
        Ok(removed.map(|pages| pages.len() as u64).unwrap_or(0))
    }

    async fn file_exists(&self, file: &str) -> Result<bool> {
        Ok(self
            .state
            .read()
            .files
            .get(file)
            .is_some_and(|pages| !pages.is_empty()))
    }

    async fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.state.read().files.keys().cloned().collect())
    }

    async fn file_summaries(&self) -> Result<Vec<IndexedFile>> {
        Ok(self
            .state
            .read()
            .files
            .iter()
            .map(|(file, pages)| IndexedFile {
                file: file.clone(),
                page_count: pages.len() as i64,
            })
            .collect())
    }

    async fn find_by_substring(&self, file: &str, canonical: &str) -> Result<Vec<PageRecord>> {
        let state = self.state.read();
        let mut hits: Vec<PageRecord> = state
            .files
            .get(file)
            .map(|pages| {
                pages
                    .iter()
                    .filter(|p| p.searchable_content.contains(canonical))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        hits.sort_by_key(|p| (p.page, p.id));
        Ok(hits)
    }
}
