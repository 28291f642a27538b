//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{BookPayload, BookQuery},
        envelope::{
            ApiResponse, BookCreated, BookCreatedResponse, BookDetail, BookDetailResponse,
            BookList, BookListResponse, MessageResponse,
        },
    },
    AppState,
};

use super::{JsonBody, QueryPairs};

/// Add a book to the shelf
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added", body = BookCreatedResponse),
        (status = 400, description = "Missing name or readPage above pageCount", body = MessageResponse),
        (status = 500, description = "Book could not be stored", body = MessageResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookCreated>>)> {
    let book_id = state.services.books.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Buku berhasil ditambahkan",
            BookCreated { book_id },
        )),
    ))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of books", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    QueryPairs(query): QueryPairs<BookQuery>,
) -> Json<ApiResponse<BookList>> {
    let books = state.services.books.list(&query).await;
    Json(ApiResponse::success(BookList { books }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<ApiResponse<BookDetail>>> {
    let book = state.services.books.get(&book_id).await?;
    Ok(Json(ApiResponse::success(BookDetail { book })))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Missing name or readPage above pageCount", body = MessageResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.update(&book_id, payload).await?;
    Ok(Json(MessageResponse::success("Buku berhasil diperbarui")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&book_id).await?;
    Ok(Json(MessageResponse::success("Buku berhasil dihapus")))
}
