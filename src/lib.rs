//! Libris Library Management Core
//!
//! In-memory record-management engine for a library's catalog, patrons and
//! loan lifecycle. A dashboard UI embeds this crate and drives it from a
//! single event loop; every mutation is snapshotted to JSON data files by
//! the storage collaborator.

pub mod collections;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;
pub mod storage;

use std::rc::Rc;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;
use storage::JsonStorage;

/// Top-level context wiring storage, stores and services together.
///
/// Built explicitly by the embedding application; there is no global state.
pub struct Library {
    pub config: AppConfig,
    pub services: Services,
}

impl Library {
    /// Open the library: create the data directory if needed, load every
    /// store from its snapshot and wire up the services.
    pub fn open(config: AppConfig) -> AppResult<Self> {
        let storage = Rc::new(JsonStorage::open(&config.storage.data_dir)?);
        let repository = Repository::open(storage);
        let services = Services::new(repository, &config);
        Ok(Self { config, services })
    }
}
