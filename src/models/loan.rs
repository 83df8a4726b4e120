//! Loan (borrow) model, queued requests and the operation audit trail

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collections::{Attribute, Searchable};
use crate::models::timestamp_format;

/// Loan lifecycle state. A returned loan is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Returned => "returned",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loan model.
///
/// Patron ids are persisted under `user_id`, the name the dashboard's data
/// files have always used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: Uuid,
    pub book_id: Uuid,
    #[serde(rename = "user_id")]
    pub patron_id: Uuid,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: LoanStatus,
}

impl Loan {
    /// Open a loan dated today with the given window.
    pub fn new(book_id: Uuid, patron_id: Uuid, duration_days: u32) -> Self {
        let loan_date = Utc::now().date_naive();
        Self {
            id: Uuid::new_v4(),
            book_id,
            patron_id,
            loan_date,
            due_date: loan_date + Duration::days(i64::from(duration_days)),
            return_date: None,
            status: LoanStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    /// An active loan past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && self.due_date < today
    }
}

impl Searchable for Loan {
    fn attribute(&self, name: &str) -> Option<Attribute<'_>> {
        match name {
            "status" => Some(Attribute::Keyword(self.status.as_str())),
            _ => None,
        }
    }
}

/// A deferred loan intent, queued until explicitly processed.
/// No validation happens at enqueue time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequest {
    pub book_id: Uuid,
    #[serde(rename = "user_id")]
    pub patron_id: Uuid,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl LoanRequest {
    pub fn new(book_id: Uuid, patron_id: Uuid) -> Self {
        Self {
            book_id,
            patron_id,
            timestamp: Utc::now().naive_utc(),
        }
    }
}

/// Kind of audited mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    CreateLoan,
    ReturnBook,
    LoanRequest,
}

/// One append-only audit-trail entry.
///
/// `success` is only recorded for processed queue requests; direct loan and
/// return operations are logged on success alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    #[serde(rename = "type")]
    pub kind: OperationType,
    pub data: serde_json::Value,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl OperationRecord {
    pub fn new(kind: OperationType, data: serde_json::Value) -> Self {
        Self {
            kind,
            data,
            timestamp: Utc::now().naive_utc(),
            success: None,
        }
    }

    pub fn with_outcome(kind: OperationType, data: serde_json::Value, success: bool) -> Self {
        Self {
            success: Some(success),
            ..Self::new(kind, data)
        }
    }
}
