//! Error types for search engine operations.

mod index_error;
mod write_error;

pub use index_error::IndexError;
pub use write_error::WriteError;
