//! Books store

use std::rc::Rc;

use uuid::Uuid;

use crate::collections::OrderedCollection;
use crate::models::{Book, BookQuery, UpdateBook};
use crate::storage::Storage;

/// Catalog store: one insertion-ordered collection of books.
pub struct BooksRepository {
    books: OrderedCollection<Book>,
    storage: Rc<dyn Storage>,
}

impl BooksRepository {
    /// Load the catalog from its snapshot.
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        let mut books = OrderedCollection::new();
        books.extend(storage.load_books());
        Self { books, storage }
    }

    /// Append a book and snapshot the catalog.
    pub fn add(&mut self, book: Book) {
        self.books.append(book);
        self.snapshot();
    }

    /// Linear scan by id.
    pub fn get_by_id(&self, id: Uuid) -> Option<Book> {
        self.books.find_first(|book| book.id == id).cloned()
    }

    pub fn all(&self) -> Vec<Book> {
        self.books.to_vec()
    }

    pub fn count(&self) -> usize {
        self.books.len()
    }

    /// Merge the provided fields into the stored record.
    /// Returns the updated book, or `None` when the id is unknown.
    pub fn update(&mut self, id: Uuid, update: &UpdateBook) -> Option<Book> {
        let updated = {
            let book = self.books.find_mut(|book| book.id == id)?;
            if let Some(ref title) = update.title {
                book.title = title.clone();
            }
            if let Some(ref author) = update.author {
                book.author = author.clone();
            }
            if let Some(ref genre) = update.genre {
                book.genre = genre.clone();
            }
            if let Some(ref isbn) = update.isbn {
                book.isbn = isbn.clone();
            }
            if let Some(status) = update.status {
                book.status = status;
            }
            if let Some(publication_date) = update.publication_date {
                book.publication_date = publication_date;
            }
            book.clone()
        };
        self.snapshot();
        Some(updated)
    }

    /// Remove a book. Returns `false` when the id is unknown.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let removed = self.books.remove_first(|book| book.id == id);
        if removed {
            self.snapshot();
        }
        removed
    }

    /// Books matching every provided criterion, in catalog order.
    pub fn search(&self, query: &BookQuery) -> OrderedCollection<Book> {
        self.books.filter(|book| query.matches(book))
    }

    fn snapshot(&self) {
        self.storage.save_books(self.books.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::BooksRepository;
    use crate::models::{Book, BookQuery, BookStatus, CreateBook, UpdateBook};
    use crate::storage::MockStorage;
    use std::rc::Rc;
    use uuid::Uuid;

    fn book(title: &str, author: &str) -> Book {
        Book::new(CreateBook {
            title: title.to_string(),
            author: author.to_string(),
            genre: "Fiction".to_string(),
            isbn: "9780000000000".to_string(),
            publication_date: None,
        })
    }

    fn repo_with(books: Vec<Book>, expected_saves: usize) -> BooksRepository {
        let mut storage = MockStorage::new();
        storage.expect_load_books().return_once(move || books);
        storage
            .expect_save_books()
            .times(expected_saves)
            .return_const(());
        BooksRepository::open(Rc::new(storage))
    }

    #[test]
    fn add_snapshots_the_catalog() {
        let mut repo = repo_with(Vec::new(), 1);
        let book = book("Ficciones", "Jorge Luis Borges");
        let id = book.id;
        repo.add(book);
        assert_eq!(repo.count(), 1);
        assert_eq!(repo.get_by_id(id).unwrap().title, "Ficciones");
    }

    #[test]
    fn update_merges_only_provided_fields() {
        let original = book("Ficciones", "Jorge Luis Borges");
        let id = original.id;
        let mut repo = repo_with(vec![original], 1);

        let updated = repo
            .update(
                id,
                &UpdateBook {
                    status: Some(BookStatus::Borrowed),
                    ..UpdateBook::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, BookStatus::Borrowed);
        assert_eq!(updated.title, "Ficciones");
        assert_eq!(updated.author, "Jorge Luis Borges");
    }

    #[test]
    fn update_of_unknown_id_does_not_snapshot() {
        let mut repo = repo_with(Vec::new(), 0);
        assert!(repo.update(Uuid::new_v4(), &UpdateBook::default()).is_none());
    }

    #[test]
    fn delete_of_unknown_id_does_not_snapshot() {
        let mut repo = repo_with(Vec::new(), 0);
        assert!(!repo.delete(Uuid::new_v4()));
    }

    #[test]
    fn delete_removes_exactly_one_record() {
        let first = book("Ficciones", "Jorge Luis Borges");
        let second = book("El Aleph", "Jorge Luis Borges");
        let first_id = first.id;
        let mut repo = repo_with(vec![first, second], 1);

        assert!(repo.delete(first_id));
        assert_eq!(repo.count(), 1);
        assert!(repo.get_by_id(first_id).is_none());
    }

    #[test]
    fn search_keeps_catalog_order_and_source_intact() {
        let first = book("Ficciones", "Jorge Luis Borges");
        let second = book("Rayuela", "Julio Cortázar");
        let third = book("El Aleph", "Jorge Luis Borges");
        let repo = repo_with(vec![first, second, third], 0);

        let hits = repo.search(&BookQuery {
            author: Some("borges".to_string()),
            ..BookQuery::default()
        });
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.get(0).unwrap().title, "Ficciones");
        assert_eq!(hits.get(1).unwrap().title, "El Aleph");
        assert_eq!(repo.count(), 3);
    }
}
