use serde::{Deserialize, Serialize};

use crate::search::tokenizer::canonicalize;

/// Stored page of a source document / 已索引的页面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PageRecord {
    pub id: i64,
    #[sqlx(rename = "filepath")]
    pub file: String,
    pub page: i64,
    pub searchable_content: String,
    pub original_content: String,
}

/// Page about to be stored; the canonical form is always derived here
/// 待写入的页面，规范化内容在此生成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPageRecord {
    file: String,
    page: i64,
    searchable_content: String,
    original_content: String,
}

impl NewPageRecord {
    pub fn new(file: impl Into<String>, page: i64, original_content: impl Into<String>) -> Self {
        let original_content = original_content.into();
        Self {
            file: file.into(),
            page,
            searchable_content: canonicalize(&original_content),
            original_content,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn searchable_content(&self) -> &str {
        &self.searchable_content
    }

    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    /// Attach the store-assigned id / 附加存储分配的ID
    pub fn into_record(self, id: i64) -> PageRecord {
        PageRecord {
            id,
            file: self.file,
            page: self.page,
            searchable_content: self.searchable_content,
            original_content: self.original_content,
        }
    }
}

/// Indexed file with its page count / 已索引文件摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct IndexedFile {
    #[sqlx(rename = "filepath")]
    pub file: String,
    pub page_count: i64,
}
