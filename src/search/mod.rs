//! Search module - page indexing and per-file substring search / 搜索模块
//!
//! Architecture:
//! - tokenizer: canonical search keys (shared by indexing and queries)
//! - parser: page-marked text stream → pages
//! - store: storage primitives (put, delete_file, file_exists, list_files, find_by_substring)
//! - searcher: controls flow (replace semantics, progress, canonicalization)
//!
//! Store backends:
//! - Database index: SQLite, one row per page (recommended)
//! - Memory index: process-local, for tests and one-shot runs

pub mod db_index;
pub mod engine;
pub mod observer;
pub mod parser;
pub mod searcher;
pub mod store;
pub mod tokenizer;

pub use db_index::SqliteIndex;
pub use engine::MemoryIndex;
pub use observer::{NoopObserver, ProgressEvent, ProgressObserver, TracingObserver};
pub use parser::{PageEvent, PageParser};
pub use searcher::PdfSearcher;
pub use store::PageStore;
pub use tokenizer::canonicalize;
