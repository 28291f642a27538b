//! Bookshelf service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult, BookAction},
    models::book::{Book, BookPayload, BookQuery, BookSummary},
    repository::Repository,
};

use super::ids::IdGenerator;

/// Draws allowed per create before giving up on finding an unused id
const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    ids: Arc<dyn IdGenerator>,
}

impl BooksService {
    pub fn new(repository: Repository, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Validate and store a new book, returning its id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        let draft = payload.validate(BookAction::Add)?;
        let now = Utc::now();

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            if self
                .repository
                .books
                .insert(Book::new(id.clone(), draft.clone(), now))
                .await
            {
                tracing::info!(book_id = %id, name = %draft.name, "Book added");
                return Ok(id);
            }
            tracing::warn!(book_id = %id, "Generated id already issued, drawing another");
        }

        Err(AppError::PersistFailure)
    }

    /// List book summaries matching the query
    pub async fn list(&self, query: &BookQuery) -> Vec<BookSummary> {
        let filter = query.filter();
        tracing::debug!(?filter, "Listing books");
        self.repository.books.list(&filter).await
    }

    /// Get a book by ID
    pub async fn get(&self, id: &str) -> AppResult<Book> {
        tracing::debug!(book_id = %id, "Fetching book");
        self.repository
            .books
            .get_by_id(id)
            .await
            .ok_or(AppError::NotFound(BookAction::Get))
    }

    /// Replace all mutable fields of a book.
    ///
    /// The payload is validated before the id is looked up, so a bad payload
    /// is reported even for an unknown id.
    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<Book> {
        let draft = payload.validate(BookAction::Update)?;
        let now = Utc::now();

        let book = self
            .repository
            .books
            .modify(id, |book| book.replace(draft, now))
            .await
            .ok_or(AppError::NotFound(BookAction::Update))?;

        tracing::info!(book_id = %id, "Book updated");
        Ok(book)
    }

    /// Delete a book permanently
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository
            .books
            .delete(id)
            .await
            .ok_or(AppError::NotFound(BookAction::Delete))?;

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    /// Number of books on the shelf
    pub async fn count(&self) -> usize {
        self.repository.books.count().await
    }
}
