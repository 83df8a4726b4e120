//! Patrons store

use std::rc::Rc;

use uuid::Uuid;

use crate::collections::OrderedCollection;
use crate::models::{Patron, PatronQuery, UpdatePatron};
use crate::storage::Storage;

/// Patron store: one insertion-ordered collection of registered readers.
pub struct PatronsRepository {
    patrons: OrderedCollection<Patron>,
    storage: Rc<dyn Storage>,
}

impl PatronsRepository {
    /// Load the patrons from their snapshot.
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        let mut patrons = OrderedCollection::new();
        patrons.extend(storage.load_patrons());
        Self { patrons, storage }
    }

    /// Append a patron and snapshot the store.
    pub fn add(&mut self, patron: Patron) {
        self.patrons.append(patron);
        self.snapshot();
    }

    /// Linear scan by id.
    pub fn get_by_id(&self, id: Uuid) -> Option<Patron> {
        self.patrons.find_first(|patron| patron.id == id).cloned()
    }

    pub fn all(&self) -> Vec<Patron> {
        self.patrons.to_vec()
    }

    pub fn count(&self) -> usize {
        self.patrons.len()
    }

    /// Merge the provided fields into the stored record.
    /// Returns the updated patron, or `None` when the id is unknown.
    pub fn update(&mut self, id: Uuid, update: &UpdatePatron) -> Option<Patron> {
        let updated = {
            let patron = self.patrons.find_mut(|patron| patron.id == id)?;
            if let Some(ref name) = update.name {
                patron.name = name.clone();
            }
            if let Some(ref email) = update.email {
                patron.email = email.clone();
            }
            patron.clone()
        };
        self.snapshot();
        Some(updated)
    }

    /// Remove a patron. Returns `false` when the id is unknown.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let removed = self.patrons.remove_first(|patron| patron.id == id);
        if removed {
            self.snapshot();
        }
        removed
    }

    /// Patrons matching every provided criterion, in registration order.
    pub fn search(&self, query: &PatronQuery) -> OrderedCollection<Patron> {
        self.patrons.filter(|patron| query.matches(patron))
    }

    /// Add a book to the patron's borrowed list.
    /// Returns `false` when the patron is unknown.
    pub fn record_borrow(&mut self, patron_id: Uuid, book_id: Uuid) -> bool {
        match self.patrons.find_mut(|patron| patron.id == patron_id) {
            Some(patron) => {
                patron.borrowed_books.push(book_id);
                self.snapshot();
                true
            }
            None => false,
        }
    }

    /// Drop the book from the borrowed list (no-op when absent) and append
    /// the loan to the patron's history.
    /// Returns `false` when the patron is unknown.
    pub fn record_return(&mut self, patron_id: Uuid, book_id: Uuid, loan_id: Uuid) -> bool {
        match self.patrons.find_mut(|patron| patron.id == patron_id) {
            Some(patron) => {
                patron.borrowed_books.retain(|id| *id != book_id);
                patron.loan_history.push(loan_id);
                self.snapshot();
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) {
        self.storage.save_patrons(self.patrons.as_slice());
    }
}
