//! SQLite page index / SQLite 页面索引
//!
//! Storage layout:
//! - `texts` table: one row per page (filepath, page, searchable_content, original_content)
//! - `filepath` index for the per-file delete / exists / search queries
//!
//! Features:
//! - WAL mode + busy timeout (concurrent readers while a file is re-indexed)
//! - substring match via `instr`, so `%` and `_` in a query are never wildcards

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};

use super::store::PageStore;
use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{IndexedFile, NewPageRecord, PageRecord};

/// SQLite-backed store / 数据库页面索引
#[derive(Debug, Clone)]
pub struct SqliteIndex {
    db: Pool<Sqlite>,
}

impl SqliteIndex {
    /// Use an existing connection pool; call [`SqliteIndex::init`] before use
    /// 使用现有数据库连接池
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }

    /// Open (creating if needed) the database described by `config` and create the schema
    /// 打开数据库并初始化表结构
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        if config.is_in_memory() {
            return Self::in_memory().await;
        }

        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = Self::file_options(&db_path)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

        let db = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;

        tracing::info!("Search database opened: {:?} (WAL mode)", db_path);

        let index = Self::new(db);
        index.init().await?;
        Ok(index)
    }

    /// Private in-memory database; a single connection that never expires keeps it alive
    /// 内存数据库（单连接）
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let index = Self::new(db);
        index.init().await?;
        Ok(index)
    }

    /// The path is passed as a filename, not a URL, so `?`, `#` and `%` stay literal
    fn file_options(path: &Path) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
    }

    /// Create tables and indexes if missing, existing data is kept
    /// 只在表不存在时创建，不删除已有数据
    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS texts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filepath TEXT NOT NULL,
                page INTEGER NOT NULL,
                searchable_content TEXT NOT NULL,
                original_content TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_texts_filepath ON texts(filepath)")
            .execute(&self.db)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_texts_filepath_page ON texts(filepath, page)")
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Close the connection pool / 关闭数据库连接池
    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[async_trait]
impl PageStore for SqliteIndex {
    async fn put(&self, record: &NewPageRecord) -> Result<PageRecord> {
        let result = sqlx::query(
            "INSERT INTO texts (filepath, page, searchable_content, original_content) VALUES (?, ?, ?, ?)",
        )
        .bind(record.file())
        .bind(record.page())
        .bind(record.searchable_content())
        .bind(record.original_content())
        .execute(&self.db)
        .await?;

        Ok(record.clone().into_record(result.last_insert_rowid()))
    }

    async fn delete_file(&self, file: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM texts WHERE filepath = ?")
            .bind(file)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn file_exists(&self, file: &str) -> Result<bool> {
        let (found,): (i64,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM texts WHERE filepath = ?)")
                .bind(file)
                .fetch_one(&self.db)
                .await?;
        Ok(found != 0)
    }

    async fn list_files(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT filepath FROM texts ORDER BY filepath")
                .fetch_all(&self.db)
                .await?;
        Ok(rows.into_iter().map(|(f,)| f).collect())
    }

    async fn file_summaries(&self) -> Result<Vec<IndexedFile>> {
        let rows = sqlx::query_as::<_, IndexedFile>(
            "SELECT filepath, COUNT(*) AS page_count FROM texts GROUP BY filepath ORDER BY filepath",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_substring(&self, file: &str, canonical: &str) -> Result<Vec<PageRecord>> {
        let rows = sqlx::query_as::<_, PageRecord>(
            r#"
            SELECT id, filepath, page, searchable_content, original_content
            FROM texts
            WHERE filepath = ? AND instr(searchable_content, ?) > 0
            ORDER BY page ASC, id ASC
            "#,
        )
        .bind(file)
        .bind(canonical)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
