//! Loan lifecycle coordinator.
//!
//! Sequences borrow/return/queued-request operations across the three stores
//! and records one audit entry per mutation. Cross-store updates run in a
//! fixed order (loan, book, patron, history) with no rollback: the embedder
//! is single-threaded and each snapshot file is written atomically, so the
//! only partial-failure window is process death between two snapshots.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::{
        Book, BookStatus, Loan, LoanRequest, OperationRecord, OperationType, UpdateBook,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    duration_days: u32,
}

impl LoansService {
    pub fn new(repository: Repository, config: &LoansConfig) -> Self {
        Self {
            repository,
            duration_days: config.duration_days,
        }
    }

    /// Queue a loan request.
    ///
    /// Nothing is validated here; unknown ids and unavailable books are only
    /// rejected when the queue is processed.
    pub fn request_loan(&self, book_id: Uuid, patron_id: Uuid) -> LoanRequest {
        let request = LoanRequest::new(book_id, patron_id);
        self.repository
            .loans
            .borrow_mut()
            .enqueue_request(request.clone());
        tracing::debug!("Loans: queued request for book {} by patron {}", book_id, patron_id);
        request
    }

    /// Drain the pending queue in strict arrival order.
    ///
    /// Every request is consumed exactly once and audited with its outcome;
    /// a failed request is not re-queued. Returns the number of requests
    /// processed.
    pub fn process_requests(&self) -> usize {
        let mut processed = 0;
        loop {
            // Scoped so the queue is released before create_loan re-borrows
            // the loans store.
            let request = self.repository.loans.borrow_mut().dequeue_request();
            let Some(request) = request else { break };

            let outcome = self.create_loan(request.book_id, request.patron_id);
            if let Err(ref err) = outcome {
                tracing::warn!("Loans: queued request not fulfilled: {}", err);
            }
            let record = OperationRecord::with_outcome(
                OperationType::LoanRequest,
                serde_json::to_value(&request).unwrap_or_default(),
                outcome.is_ok(),
            );
            self.repository.loans.borrow_mut().push_history(record);
            processed += 1;
        }
        processed
    }

    /// Create a new loan (borrow a book).
    ///
    /// Fails without touching any store when the book is unknown or not
    /// available, or when the patron is unknown.
    pub fn create_loan(&self, book_id: Uuid, patron_id: Uuid) -> AppResult<Loan> {
        let book = self.checked_out_candidate(book_id)?;
        if self.repository.patrons.borrow().get_by_id(patron_id).is_none() {
            return Err(AppError::NotFound(format!(
                "Patron with id {} not found",
                patron_id
            )));
        }

        let loan = Loan::new(book_id, patron_id, self.duration_days);
        self.repository.loans.borrow_mut().append(loan.clone());
        self.repository
            .books
            .borrow_mut()
            .update(book_id, &UpdateBook::status(BookStatus::Borrowed));
        self.repository
            .patrons
            .borrow_mut()
            .record_borrow(patron_id, book_id);
        self.repository.loans.borrow_mut().push_history(OperationRecord::new(
            OperationType::CreateLoan,
            serde_json::to_value(&loan).unwrap_or_default(),
        ));

        tracing::info!(
            "Loans: {} borrowed \"{}\" until {}",
            patron_id,
            book.title,
            loan.due_date
        );
        Ok(loan)
    }

    /// Return a borrowed book.
    ///
    /// Only active loans can be returned; the transition is terminal. The
    /// book flip and patron bookkeeping tolerate records deleted since the
    /// loan was created.
    pub fn return_book(&self, loan_id: Uuid) -> AppResult<Loan> {
        let loan = self
            .repository
            .loans
            .borrow()
            .get_by_id(loan_id)
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;
        if !loan.is_active() {
            return Err(AppError::InvalidState(format!(
                "Loan {} is already returned",
                loan_id
            )));
        }

        let today = Utc::now().date_naive();
        let returned = self
            .repository
            .loans
            .borrow_mut()
            .set_returned(loan_id, today)
            .ok_or_else(|| {
                AppError::InvalidState(format!("Loan {} is already returned", loan_id))
            })?;

        let book_restored = self
            .repository
            .books
            .borrow_mut()
            .update(loan.book_id, &UpdateBook::status(BookStatus::Available))
            .is_some();
        if !book_restored {
            tracing::warn!("Loans: returned loan {} references a deleted book {}", loan_id, loan.book_id);
        }
        if !self
            .repository
            .patrons
            .borrow_mut()
            .record_return(loan.patron_id, loan.book_id, loan_id)
        {
            tracing::warn!("Loans: returned loan {} references a deleted patron {}", loan_id, loan.patron_id);
        }

        self.repository.loans.borrow_mut().push_history(OperationRecord::new(
            OperationType::ReturnBook,
            serde_json::to_value(&returned).unwrap_or_default(),
        ));

        tracing::info!("Loans: loan {} returned", loan_id);
        Ok(returned)
    }

    /// Get a loan by ID
    pub fn get_loan(&self, id: Uuid) -> AppResult<Loan> {
        self.repository
            .loans
            .borrow()
            .get_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Active loans in creation order
    pub fn active_loans(&self) -> Vec<Loan> {
        self.repository.loans.borrow().active()
    }

    /// Full audit trail, oldest entry first
    pub fn history(&self) -> Vec<OperationRecord> {
        self.repository.loans.borrow().history()
    }

    /// Pending requests in arrival order, without dequeuing
    pub fn pending_requests(&self) -> Vec<LoanRequest> {
        self.repository.loans.borrow().pending_requests()
    }

    /// Count active loans
    pub fn count_active(&self) -> usize {
        self.repository.loans.borrow().count_active()
    }

    /// Count active loans past their due date
    pub fn count_overdue(&self) -> usize {
        self.repository
            .loans
            .borrow()
            .count_overdue(Utc::now().date_naive())
    }

    /// The book, provided it exists and can be lent.
    fn checked_out_candidate(&self, book_id: Uuid) -> AppResult<Book> {
        let book = self
            .repository
            .books
            .borrow()
            .get_by_id(book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;
        if book.status != BookStatus::Available {
            return Err(AppError::InvalidState(format!(
                "Book {} is {}, not available",
                book_id, book.status
            )));
        }
        Ok(book)
    }
}
