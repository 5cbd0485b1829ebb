//! Search and index management endpoints / 搜索与索引管理接口

pub mod admin;
pub mod query;
pub mod types;

pub use admin::{file_status, index_file, list_files, remove_file};
pub use query::search;
