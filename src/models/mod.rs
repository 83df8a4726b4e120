//! Domain models for the Libris core

pub mod book;
pub mod loan;
pub mod patron;

pub use book::{Book, BookQuery, BookStatus, CreateBook, UpdateBook};
pub use loan::{Loan, LoanRequest, LoanStatus, OperationRecord, OperationType};
pub use patron::{CreatePatron, Patron, PatronQuery, UpdatePatron};

/// Serde helper for `YYYY-MM-DD HH:MM:SS` operation and request timestamps.
pub(crate) mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
