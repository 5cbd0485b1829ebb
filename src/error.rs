//! Error types for indexing and search / 索引与搜索错误类型

use std::path::PathBuf;

use thiserror::Error;

/// Why a page sentinel could not be read / 页标记解析失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("page marker has no page number")]
    MissingPageNumber,
    #[error("page number `{0}` is not a base-10 integer")]
    InvalidPageNumber(String),
    #[error("page number {0} is not positive")]
    NonPositivePageNumber(i64),
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("`{file}` is not a .{expected} file")]
    InvalidFileKey { file: String, expected: String },

    #[error("file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("`{file}` is outside the source root {}", .root.display())]
    OutsideSourceRoot { file: String, root: PathBuf },

    /// `line` is 1-based
    #[error("parse error at line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("index store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl IndexError {
    /// Caller-side mistakes (bad key or malformed input), as opposed to I/O or store failures
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IndexError::InvalidFileKey { .. }
                | IndexError::FileNotFound(_)
                | IndexError::OutsideSourceRoot { .. }
                | IndexError::Parse { .. }
        )
    }
}

pub type Result<T, E = IndexError> = std::result::Result<T, E>;
