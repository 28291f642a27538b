//! Data models for the bookshelf

pub mod book;
pub mod envelope;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookFilter, BookPayload, BookQuery, BookSummary};
pub use envelope::{ApiResponse, MessageResponse, Status};
