//! Persistence collaborator: JSON snapshot files.
//!
//! Every mutating store operation snapshots its whole collection to one JSON
//! array file under the data directory, mirroring what the dashboard's data
//! files have always looked like. Snapshot write failures are logged and do
//! not fail the in-memory operation; a missing or unparsable file on load
//! degrades to an empty store and is rewritten as `[]`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Book, Loan, LoanRequest, OperationRecord, Patron};

const BOOKS_FILE: &str = "books.json";
const PATRONS_FILE: &str = "patrons.json";
const LOANS_FILE: &str = "loans.json";
const HISTORY_FILE: &str = "operations_history.json";
const REQUESTS_FILE: &str = "loan_requests.json";

/// Snapshot backend the stores write through after every mutation.
#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    fn load_books(&self) -> Vec<Book>;
    fn save_books(&self, books: &[Book]);
    fn load_patrons(&self) -> Vec<Patron>;
    fn save_patrons(&self, patrons: &[Patron]);
    fn load_loans(&self) -> Vec<Loan>;
    fn save_loans(&self, loans: &[Loan]);
    fn load_history(&self) -> Vec<OperationRecord>;
    fn save_history(&self, records: &[OperationRecord]);
    fn load_requests(&self) -> Vec<LoanRequest>;
    fn save_requests(&self, requests: &[LoanRequest]);
}

/// File-backed storage: one pretty-printed JSON array per entity kind.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    data_dir: PathBuf,
}

impl JsonStorage {
    /// Open (and create if needed) the data directory.
    pub fn open(data_dir: impl AsRef<Path>) -> io::Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load<T: DeserializeOwned + Serialize>(&self, file: &str) -> Vec<T> {
        let path = self.data_dir.join(file);
        match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(items) => items,
                Err(err) => {
                    tracing::warn!("Unparsable snapshot {}: {}; starting empty", path.display(), err);
                    self.save::<T>(file, &[]);
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.save::<T>(file, &[]);
                Vec::new()
            }
            Err(err) => {
                tracing::error!("Cannot read snapshot {}: {}; starting empty", path.display(), err);
                Vec::new()
            }
        }
    }

    fn save<T: Serialize>(&self, file: &str, items: &[T]) {
        let path = self.data_dir.join(file);
        if let Err(err) = self.write_snapshot(&path, items) {
            tracing::error!("Cannot write snapshot {}: {}", path.display(), err);
        }
    }

    // Write through a sibling temp file and rename so a crash mid-write never
    // leaves a torn snapshot behind.
    fn write_snapshot<T: Serialize>(&self, path: &Path, items: &[T]) -> io::Result<()> {
        let bytes = serde_json::to_vec_pretty(items)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)
    }
}

impl Storage for JsonStorage {
    fn load_books(&self) -> Vec<Book> {
        self.load(BOOKS_FILE)
    }

    fn save_books(&self, books: &[Book]) {
        self.save(BOOKS_FILE, books);
    }

    fn load_patrons(&self) -> Vec<Patron> {
        self.load(PATRONS_FILE)
    }

    fn save_patrons(&self, patrons: &[Patron]) {
        self.save(PATRONS_FILE, patrons);
    }

    fn load_loans(&self) -> Vec<Loan> {
        self.load(LOANS_FILE)
    }

    fn save_loans(&self, loans: &[Loan]) {
        self.save(LOANS_FILE, loans);
    }

    fn load_history(&self) -> Vec<OperationRecord> {
        self.load(HISTORY_FILE)
    }

    fn save_history(&self, records: &[OperationRecord]) {
        self.save(HISTORY_FILE, records);
    }

    fn load_requests(&self) -> Vec<LoanRequest> {
        self.load(REQUESTS_FILE)
    }

    fn save_requests(&self, requests: &[LoanRequest]) {
        self.save(REQUESTS_FILE, requests);
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonStorage, Storage};
    use crate::models::{Book, CreateBook, CreatePatron, Loan, Patron};
    use uuid::Uuid;

    fn sample_book() -> Book {
        Book::new(CreateBook {
            title: "Rayuela".to_string(),
            author: "Julio Cortázar".to_string(),
            genre: "Fiction".to_string(),
            isbn: "9788437624846".to_string(),
            publication_date: None,
        })
    }

    #[test]
    fn missing_files_load_empty_and_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::open(dir.path()).unwrap();

        assert!(storage.load_books().is_empty());
        let raw = std::fs::read_to_string(dir.path().join("books.json")).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn unparsable_files_are_reset_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("loans.json"), b"{not json").unwrap();
        let storage = JsonStorage::open(dir.path()).unwrap();

        assert!(storage.load_loans().is_empty());
        let raw = std::fs::read_to_string(dir.path().join("loans.json")).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn books_round_trip_through_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::open(dir.path()).unwrap();

        let book = sample_book();
        storage.save_books(std::slice::from_ref(&book));

        let loaded = storage.load_books();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, book.id);
        assert_eq!(loaded[0].title, book.title);
    }

    #[test]
    fn loans_round_trip_through_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::open(dir.path()).unwrap();

        let loan = Loan::new(Uuid::new_v4(), Uuid::new_v4(), 14);
        storage.save_loans(std::slice::from_ref(&loan));

        let loaded = storage.load_loans();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, loan.id);
        assert_eq!(loaded[0].due_date, loan.due_date);
    }

    #[test]
    fn patrons_round_trip_with_their_borrow_lists() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::open(dir.path()).unwrap();

        let mut patron = Patron::new(CreatePatron {
            name: "Elena Poniatowska".to_string(),
            email: "elena@example.org".to_string(),
        });
        patron.borrowed_books.push(Uuid::new_v4());
        patron.loan_history.push(Uuid::new_v4());
        storage.save_patrons(std::slice::from_ref(&patron));

        let loaded = storage.load_patrons();
        assert_eq!(loaded[0].borrowed_books, patron.borrowed_books);
        assert_eq!(loaded[0].loan_history, patron.loan_history);
    }

    #[test]
    fn snapshots_overwrite_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::open(dir.path()).unwrap();

        storage.save_books(&[sample_book(), sample_book()]);
        storage.save_books(&[]);
        assert!(storage.load_books().is_empty());
    }
}
