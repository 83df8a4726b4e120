//! Patron management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CreatePatron, Patron, PatronQuery, UpdatePatron},
    repository::Repository,
};

#[derive(Clone)]
pub struct PatronsService {
    repository: Repository,
}

impl PatronsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new patron
    pub fn add_patron(&self, create: CreatePatron) -> AppResult<Patron> {
        create
            .validate()
            .map_err(|err| AppError::Validation(err.to_string()))?;

        let patron = Patron::new(create);
        tracing::info!("Patrons: registering {} ({})", patron.name, patron.id);
        self.repository.patrons.borrow_mut().add(patron.clone());
        Ok(patron)
    }

    /// Get a patron by ID
    pub fn get_patron(&self, id: Uuid) -> AppResult<Patron> {
        self.repository
            .patrons
            .borrow()
            .get_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))
    }

    /// All patrons in registration order
    pub fn list_patrons(&self) -> Vec<Patron> {
        self.repository.patrons.borrow().all()
    }

    /// Update an existing patron, merging only the provided fields
    pub fn update_patron(&self, id: Uuid, update: UpdatePatron) -> AppResult<Patron> {
        update
            .validate()
            .map_err(|err| AppError::Validation(err.to_string()))?;

        self.repository
            .patrons
            .borrow_mut()
            .update(id, &update)
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))
    }

    /// Delete a patron.
    /// Refused while the patron still has a book out.
    pub fn delete_patron(&self, id: Uuid) -> AppResult<()> {
        let has_borrows = self
            .repository
            .patrons
            .borrow()
            .get_by_id(id)
            .map(|patron| patron.has_active_borrows())
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))?;
        if has_borrows {
            return Err(AppError::InvalidState(format!(
                "Patron {} still has borrowed books and cannot be deleted",
                id
            )));
        }

        self.repository.patrons.borrow_mut().delete(id);
        tracing::info!("Patrons: deleted {}", id);
        Ok(())
    }

    /// Search patrons matching every provided criterion
    pub fn search_patrons(&self, query: &PatronQuery) -> Vec<Patron> {
        self.repository.patrons.borrow().search(query).to_vec()
    }
}
