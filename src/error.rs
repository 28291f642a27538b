//! Error types for the bookshelf server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::MessageResponse;

/// Operation a book error happened in; it selects the client-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Add,
    Get,
    Update,
    Delete,
}

impl BookAction {
    fn verb(self) -> &'static str {
        match self {
            BookAction::Add => "menambahkan",
            BookAction::Get => "menampilkan",
            BookAction::Update => "memperbarui",
            BookAction::Delete => "menghapus",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            BookAction::Update => "Gagal memperbarui buku. Id tidak ditemukan",
            BookAction::Delete => "Buku gagal dihapus. Id tidak ditemukan",
            BookAction::Add | BookAction::Get => "Buku tidak ditemukan",
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Gagal {} buku. Mohon isi nama buku", .0.verb())]
    MissingName(BookAction),

    #[error("Gagal {} buku. readPage tidak boleh lebih besar dari pageCount", .0.verb())]
    InvalidPageRange(BookAction),

    #[error("{}", .0.not_found_message())]
    NotFound(BookAction),

    #[error("Buku gagal ditambahkan")]
    PersistFailure,

    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingName(_) | AppError::InvalidPageRange(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PersistFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(MessageResponse::fail(self.to_string()))).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
