//! Book (catalog entry) model and related types

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::collections::{Attribute, Searchable};

/// Lending status of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Available,
    Borrowed,
    Reserved,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
            BookStatus::Reserved => "reserved",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(BookStatus::Available),
            "borrowed" => Ok(BookStatus::Borrowed),
            "reserved" => Ok(BookStatus::Reserved),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

/// Full book model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    #[serde(default)]
    pub status: BookStatus,
    pub publication_date: NaiveDate,
}

impl Book {
    /// Build a new catalog entry. Entries always start available.
    pub fn new(create: CreateBook) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: create.title,
            author: create.author,
            genre: create.genre,
            isbn: create.isbn,
            status: BookStatus::Available,
            publication_date: create
                .publication_date
                .unwrap_or_else(|| Utc::now().date_naive()),
        }
    }
}

impl Searchable for Book {
    fn attribute(&self, name: &str) -> Option<Attribute<'_>> {
        match name {
            "title" => Some(Attribute::Text(&self.title)),
            "author" => Some(Attribute::Text(&self.author)),
            "genre" => Some(Attribute::Text(&self.genre)),
            "isbn" => Some(Attribute::Text(&self.isbn)),
            "status" => Some(Attribute::Keyword(self.status.as_str())),
            _ => None,
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10 to 13 characters"))]
    pub isbn: String,
    /// Defaults to the current date when omitted.
    pub publication_date: Option<NaiveDate>,
}

/// Update book request; only the provided fields are changed
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: Option<String>,
    pub genre: Option<String>,
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10 to 13 characters"))]
    pub isbn: Option<String>,
    pub status: Option<BookStatus>,
    pub publication_date: Option<NaiveDate>,
}

impl UpdateBook {
    /// Shorthand for the status-only update the loan workflow issues.
    pub fn status(status: BookStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Book search criteria; a record matches when every provided field matches
#[derive(Debug, Default, Deserialize)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub status: Option<BookStatus>,
}

impl BookQuery {
    /// Substring match (case-insensitive) on the text fields, exact match on
    /// ISBN and status.
    pub fn matches(&self, book: &Book) -> bool {
        fn contains(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        if let Some(ref title) = self.title {
            if !contains(&book.title, title) {
                return false;
            }
        }
        if let Some(ref author) = self.author {
            if !contains(&book.author, author) {
                return false;
            }
        }
        if let Some(ref genre) = self.genre {
            if !contains(&book.genre, genre) {
                return false;
            }
        }
        if let Some(ref isbn) = self.isbn {
            if book.isbn != *isbn {
                return false;
            }
        }
        if let Some(status) = self.status {
            if book.status != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookQuery, BookStatus, CreateBook};
    use validator::Validate;

    fn sample() -> Book {
        Book::new(CreateBook {
            title: "Pedro Páramo".to_string(),
            author: "Juan Rulfo".to_string(),
            genre: "Fiction".to_string(),
            isbn: "9788437604183".to_string(),
            publication_date: None,
        })
    }

    #[test]
    fn new_books_start_available() {
        let book = sample();
        assert_eq!(book.status, BookStatus::Available);
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let book = sample();
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["status"], "available");
        assert!(value["publication_date"].as_str().unwrap().len() == 10);
        assert!(value["id"].is_string());
    }

    #[test]
    fn round_trips_through_json() {
        let book = sample();
        let json = serde_json::to_string(&book).unwrap();
        let restored: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, book.id);
        assert_eq!(restored.title, book.title);
        assert_eq!(restored.isbn, book.isbn);
        assert_eq!(restored.status, book.status);
        assert_eq!(restored.publication_date, book.publication_date);
    }

    #[test]
    fn status_parses_from_lowercase_names() {
        assert_eq!("available".parse::<BookStatus>().unwrap(), BookStatus::Available);
        assert_eq!("Borrowed".parse::<BookStatus>().unwrap(), BookStatus::Borrowed);
        assert!("lost".parse::<BookStatus>().is_err());
    }

    #[test]
    fn query_requires_every_criterion() {
        let book = sample();
        let query = BookQuery {
            author: Some("rulfo".to_string()),
            status: Some(BookStatus::Available),
            ..BookQuery::default()
        };
        assert!(query.matches(&book));

        let query = BookQuery {
            author: Some("rulfo".to_string()),
            status: Some(BookStatus::Borrowed),
            ..BookQuery::default()
        };
        assert!(!query.matches(&book));
    }

    #[test]
    fn isbn_criterion_is_exact() {
        let book = sample();
        let query = BookQuery {
            isbn: Some("9788437604".to_string()),
            ..BookQuery::default()
        };
        assert!(!query.matches(&book));
    }

    #[test]
    fn attribute_search_spans_the_catalog_fields() {
        use crate::collections::OrderedCollection;

        let mut catalog = OrderedCollection::new();
        catalog.append(sample());
        let mut borrowed = sample();
        borrowed.status = BookStatus::Borrowed;
        borrowed.title = "El llano en llamas".to_string();
        catalog.append(borrowed);

        assert_eq!(catalog.search_all_by_attribute("author", "RULFO").len(), 2);
        assert_eq!(catalog.search_all_by_attribute("title", "llano").len(), 1);
        assert_eq!(catalog.search_all_by_attribute("status", "borrowed").len(), 1);
        assert!(catalog.search_all_by_attribute("publisher", "x").is_empty());
    }

    #[test]
    fn create_book_rejects_blank_title() {
        let create = CreateBook {
            title: String::new(),
            author: "Juan Rulfo".to_string(),
            genre: "Fiction".to_string(),
            isbn: "9788437604183".to_string(),
            publication_date: None,
        };
        assert!(create.validate().is_err());
    }
}
