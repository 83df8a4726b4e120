//! Dashboard statistics service

use chrono::Utc;
use serde::Serialize;

use crate::{models::BookStatus, repository::Repository};

/// Aggregated counters for the dashboard home page.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryStats {
    pub books_total: usize,
    pub books_available: usize,
    pub patrons_total: usize,
    pub loans_active: usize,
    pub loans_overdue: usize,
    pub requests_pending: usize,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Collect the current counters.
    pub fn collect(&self) -> LibraryStats {
        let books = self.repository.books.borrow();
        let loans = self.repository.loans.borrow();
        let today = Utc::now().date_naive();
        LibraryStats {
            books_total: books.count(),
            books_available: books
                .all()
                .iter()
                .filter(|book| book.status == BookStatus::Available)
                .count(),
            patrons_total: self.repository.patrons.borrow().count(),
            loans_active: loans.count_active(),
            loans_overdue: loans.count_overdue(today),
            requests_pending: loans.pending_count(),
        }
    }
}
