//! Patron (registered reader) model and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::collections::{Attribute, Searchable};

/// Full patron model.
///
/// `borrowed_books` tracks the ids of currently borrowed books;
/// `loan_history` accumulates the ids of returned loans, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patron {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub borrowed_books: Vec<Uuid>,
    #[serde(default)]
    pub loan_history: Vec<Uuid>,
}

impl Patron {
    pub fn new(create: CreatePatron) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: create.name,
            email: create.email,
            borrowed_books: Vec::new(),
            loan_history: Vec::new(),
        }
    }

    /// Whether the patron currently has any book out.
    pub fn has_active_borrows(&self) -> bool {
        !self.borrowed_books.is_empty()
    }
}

impl Searchable for Patron {
    fn attribute(&self, name: &str) -> Option<Attribute<'_>> {
        match name {
            "name" => Some(Attribute::Text(&self.name)),
            "email" => Some(Attribute::Text(&self.email)),
            _ => None,
        }
    }
}

/// Create patron request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePatron {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Update patron request; only the provided fields are changed
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePatron {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Patron search criteria; a record matches when every provided field matches
#[derive(Debug, Default, Deserialize)]
pub struct PatronQuery {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl PatronQuery {
    pub fn matches(&self, patron: &Patron) -> bool {
        fn contains(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        if let Some(ref name) = self.name {
            if !contains(&patron.name, name) {
                return false;
            }
        }
        if let Some(ref email) = self.email {
            if !contains(&patron.email, email) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{CreatePatron, Patron, PatronQuery};
    use validator::Validate;

    fn sample() -> Patron {
        Patron::new(CreatePatron {
            name: "Gabriela Mistral".to_string(),
            email: "gabriela@example.org".to_string(),
        })
    }

    #[test]
    fn new_patrons_have_no_borrows() {
        let patron = sample();
        assert!(patron.borrowed_books.is_empty());
        assert!(patron.loan_history.is_empty());
        assert!(!patron.has_active_borrows());
    }

    #[test]
    fn round_trips_through_json() {
        let mut patron = sample();
        patron.borrowed_books.push(uuid::Uuid::new_v4());
        let json = serde_json::to_string(&patron).unwrap();
        let restored: Patron = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, patron.id);
        assert_eq!(restored.email, patron.email);
        assert_eq!(restored.borrowed_books, patron.borrowed_books);
    }

    #[test]
    fn deserializes_without_borrow_lists() {
        let patron: Patron = serde_json::from_str(
            r#"{"id":"9f3a55a1-5ac8-4f0b-a7cc-05a5b2a2a0f7","name":"N","email":"n@example.org"}"#,
        )
        .unwrap();
        assert!(patron.borrowed_books.is_empty());
    }

    #[test]
    fn query_matches_name_substring() {
        let patron = sample();
        let query = PatronQuery {
            name: Some("mistral".to_string()),
            ..PatronQuery::default()
        };
        assert!(query.matches(&patron));

        let query = PatronQuery {
            name: Some("mistral".to_string()),
            email: Some("@nowhere".to_string()),
        };
        assert!(!query.matches(&patron));
    }

    #[test]
    fn create_patron_rejects_bad_email() {
        let create = CreatePatron {
            name: "Gabriela".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(create.validate().is_err());
    }
}
