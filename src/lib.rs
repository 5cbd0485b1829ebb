pub mod config;
pub mod error;
pub mod models;
pub mod search;

pub use error::{IndexError, Result};
pub use models::{IndexedFile, PageRecord};
pub use search::{canonicalize, PdfSearcher};
