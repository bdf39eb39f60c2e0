//! Book records and the editable draft used to create or update them.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, require_text};
use crate::id::BookId;

/// A catalogued book.
///
/// `available` is maintained by the ledger: it is false exactly while an
/// active issue references the book. Drafts cannot set it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub isbn: String,
    pub published_year: i32,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cover_image: String,
}

fn default_available() -> bool {
    true
}

impl Book {
    /// Case-insensitive match of an already-lowercased needle against
    /// title, author and category.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.title, &self.author, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// The caller-editable fields of a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub category: String,
    pub isbn: String,
    pub published_year: i32,
    #[serde(default)]
    pub cover_image: String,
}

impl BookDraft {
    pub fn validate(&self) -> Result<(), LedgerError> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)?;
        require_text("category", &self.category)?;
        require_text("isbn", &self.isbn)?;
        if self.published_year <= 0 {
            return Err(LedgerError::invalid(
                "publishedYear",
                format!("{} is not a valid year", self.published_year),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_book(self, id: BookId, available: bool) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            category: self.category,
            isbn: self.isbn,
            published_year: self.published_year,
            available,
            cover_image: self.cover_image,
        }
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            isbn: book.isbn.clone(),
            published_year: book.published_year,
            cover_image: book.cover_image.clone(),
        }
    }
}
