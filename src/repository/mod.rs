//! Record stores: in-memory collections with snapshot-on-mutation.

pub mod books;
pub mod loans;
pub mod patrons;

use std::cell::RefCell;
use std::rc::Rc;

use crate::storage::Storage;

pub use books::BooksRepository;
pub use loans::LoansRepository;
pub use patrons::PatronsRepository;

/// Container handing shared store handles to the services.
///
/// Stores are built once from the storage snapshots and shared through
/// `Rc<RefCell<…>>`: the core runs single-threaded (one dashboard event loop
/// drives it), so interior mutability stands in for cross-store
/// back-references. An embedder serving concurrent requests must add its own
/// locking around the whole container.
#[derive(Clone)]
pub struct Repository {
    pub books: Rc<RefCell<BooksRepository>>,
    pub patrons: Rc<RefCell<PatronsRepository>>,
    pub loans: Rc<RefCell<LoansRepository>>,
}

impl Repository {
    /// Load all stores from the given storage backend.
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        Self {
            books: Rc::new(RefCell::new(BooksRepository::open(Rc::clone(&storage)))),
            patrons: Rc::new(RefCell::new(PatronsRepository::open(Rc::clone(&storage)))),
            loans: Rc::new(RefCell::new(LoansRepository::open(storage))),
        }
    }
}
