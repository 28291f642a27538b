//! Repository layer holding the in-memory shelf

pub mod books;

/// Main repository struct; cloning shares the same underlying storage
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    pub fn new() -> Self {
        Self {
            books: books::BooksRepository::new(),
        }
    }
}
