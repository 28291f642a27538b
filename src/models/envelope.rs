//! JSON envelope shared by every response

use serde::Serialize;
use utoipa::ToSchema;

use super::book::{Book, BookSummary};

/// Outcome marker carried in every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// Envelope with a data payload
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    BookCreatedResponse = ApiResponse<BookCreated>,
    BookListResponse = ApiResponse<BookList>,
    BookDetailResponse = ApiResponse<BookDetail>
)]
pub struct ApiResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data,
        }
    }
}

/// Envelope without data, used for plain confirmations and failures
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: Status,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: message.into(),
        }
    }
}

/// Data returned after a book is added
#[derive(Debug, Serialize, ToSchema)]
pub struct BookCreated {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetail {
    pub book: Book,
}
