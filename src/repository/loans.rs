//! Loans store: active/returned loans, the operation history and the
//! pending-request queue, each snapshotting to its own file.

use std::rc::Rc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::collections::{OrderedCollection, Queue, Stack};
use crate::models::{Loan, LoanRequest, LoanStatus, OperationRecord};
use crate::storage::Storage;

pub struct LoansRepository {
    loans: OrderedCollection<Loan>,
    history: Stack<OperationRecord>,
    requests: Queue<LoanRequest>,
    storage: Rc<dyn Storage>,
}

impl LoansRepository {
    /// Load loans, history and pending requests from their snapshots.
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        let mut loans = OrderedCollection::new();
        loans.extend(storage.load_loans());
        let mut history = Stack::new();
        history.extend(storage.load_history());
        let mut requests = Queue::new();
        requests.extend(storage.load_requests());
        Self {
            loans,
            history,
            requests,
            storage,
        }
    }

    /// Append a loan and snapshot the loan collection.
    pub fn append(&mut self, loan: Loan) {
        self.loans.append(loan);
        self.storage.save_loans(self.loans.as_slice());
    }

    /// Linear scan by id.
    pub fn get_by_id(&self, id: Uuid) -> Option<Loan> {
        self.loans.find_first(|loan| loan.id == id).cloned()
    }

    /// Close an active loan: set the return date and flip the status.
    /// Returns the updated loan, or `None` when the id is unknown or the
    /// loan is not active.
    pub fn set_returned(&mut self, id: Uuid, return_date: NaiveDate) -> Option<Loan> {
        let updated = {
            let loan = self
                .loans
                .find_mut(|loan| loan.id == id && loan.is_active())?;
            loan.return_date = Some(return_date);
            loan.status = LoanStatus::Returned;
            loan.clone()
        };
        self.storage.save_loans(self.loans.as_slice());
        Some(updated)
    }

    pub fn all(&self) -> Vec<Loan> {
        self.loans.to_vec()
    }

    /// Active loans in creation order.
    pub fn active(&self) -> Vec<Loan> {
        self.loans.filter(Loan::is_active).to_vec()
    }

    pub fn count_active(&self) -> usize {
        self.loans.iter().filter(|loan| loan.is_active()).count()
    }

    pub fn count_overdue(&self, today: NaiveDate) -> usize {
        self.loans.iter().filter(|loan| loan.is_overdue(today)).count()
    }

    /// Push an audit record and snapshot the history.
    pub fn push_history(&mut self, record: OperationRecord) {
        self.history.push(record);
        self.storage.save_history(self.history.as_slice());
    }

    /// Audit trail in push order, oldest first.
    pub fn history(&self) -> Vec<OperationRecord> {
        self.history.to_vec()
    }

    /// Queue a request and snapshot the queue.
    pub fn enqueue_request(&mut self, request: LoanRequest) {
        self.requests.enqueue(request);
        self.storage.save_requests(&self.requests.to_vec());
    }

    /// Take the oldest pending request and snapshot the queue.
    pub fn dequeue_request(&mut self) -> Option<LoanRequest> {
        let request = self.requests.dequeue()?;
        self.storage.save_requests(&self.requests.to_vec());
        Some(request)
    }

    /// Pending requests in arrival order, without dequeuing.
    pub fn pending_requests(&self) -> Vec<LoanRequest> {
        self.requests.to_vec()
    }

    pub fn pending_count(&self) -> usize {
        self.requests.len()
    }
}
