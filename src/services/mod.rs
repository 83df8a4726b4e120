//! Business logic services

pub mod catalog;
pub mod loans;
pub mod patrons;
pub mod stats;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub patrons: patrons::PatronsService,
    pub loans: loans::LoansService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            patrons: patrons::PatronsService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone(), &config.loans),
            stats: stats::StatsService::new(repository),
        }
    }
}
