//! Books repository

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::models::book::{Book, BookFilter, BookSummary};

#[derive(Debug, Default)]
struct Shelf {
    /// Live books in insertion order
    books: IndexMap<String, Book>,
    /// Every id ever stored, deleted ones included
    issued: HashSet<String>,
}

#[derive(Clone, Default)]
pub struct BooksRepository {
    shelf: Arc<RwLock<Shelf>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// List book summaries matching `filter`, in insertion order
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        let shelf = self.shelf.read().await;
        shelf
            .books
            .values()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: &str) -> Option<Book> {
        self.shelf.read().await.books.get(id).cloned()
    }

    /// Append a book. Returns `false` without storing anything when its id
    /// has already been issued, even if that book was deleted since.
    pub async fn insert(&self, book: Book) -> bool {
        let mut shelf = self.shelf.write().await;
        if !shelf.issued.insert(book.id.clone()) {
            return false;
        }
        shelf.books.insert(book.id.clone(), book);
        true
    }

    /// Apply `change` to the book with `id` and return the updated record
    pub async fn modify<F>(&self, id: &str, change: F) -> Option<Book>
    where
        F: FnOnce(&mut Book),
    {
        let mut shelf = self.shelf.write().await;
        let book = shelf.books.get_mut(id)?;
        change(book);
        Some(book.clone())
    }

    /// Remove a book, keeping the order of the remaining ones
    pub async fn delete(&self, id: &str) -> Option<Book> {
        self.shelf.write().await.books.shift_remove(id)
    }

    /// Number of live books
    pub async fn count(&self) -> usize {
        self.shelf.read().await.books.len()
    }
}
