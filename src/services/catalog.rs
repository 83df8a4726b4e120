//! Catalog management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new book; entries always start available.
    pub fn add_book(&self, create: CreateBook) -> AppResult<Book> {
        create
            .validate()
            .map_err(|err| AppError::Validation(err.to_string()))?;

        let book = Book::new(create);
        tracing::info!("Catalog: adding book {} ({})", book.title, book.id);
        self.repository.books.borrow_mut().add(book.clone());
        Ok(book)
    }

    /// Get a book by ID
    pub fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.repository
            .books
            .borrow()
            .get_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// All books in catalog order
    pub fn list_books(&self) -> Vec<Book> {
        self.repository.books.borrow().all()
    }

    /// Update an existing book, merging only the provided fields
    pub fn update_book(&self, id: Uuid, update: UpdateBook) -> AppResult<Book> {
        update
            .validate()
            .map_err(|err| AppError::Validation(err.to_string()))?;

        self.repository
            .books
            .borrow_mut()
            .update(id, &update)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book.
    /// Refused while an active loan references the book.
    pub fn delete_book(&self, id: Uuid) -> AppResult<()> {
        let has_active_loan = self
            .repository
            .loans
            .borrow()
            .active()
            .iter()
            .any(|loan| loan.book_id == id);
        if has_active_loan {
            return Err(AppError::InvalidState(format!(
                "Book {} has an active loan and cannot be deleted",
                id
            )));
        }

        if self.repository.books.borrow_mut().delete(id) {
            tracing::info!("Catalog: deleted book {}", id);
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Book with id {} not found", id)))
        }
    }

    /// Search books matching every provided criterion
    pub fn search_books(&self, query: &BookQuery) -> Vec<Book> {
        self.repository.books.borrow().search(query).to_vec()
    }
}
