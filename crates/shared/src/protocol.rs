use serde::{Deserialize, Serialize};

use crate::domain::Book;

/// Path of the book collection endpoint, relative to the backend base address.
pub const BOOKS_PATH: &str = "/api/books";

/// Query string of `GET /api/books`. Unset fields are left out of the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBooksQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl ListBooksQuery {
    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.q.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBooksResponse {
    #[serde(default)]
    pub items: Option<Vec<Book>>,
}

impl ListBooksResponse {
    pub fn into_items(self) -> Vec<Book> {
        self.items.unwrap_or_default()
    }
}

/// Body of `POST /api/books`.
///
/// Text fields are sent verbatim, empty strings included. `tags` is always
/// serialized: `null` means no tags were given, which the server treats
/// differently from an explicit empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub cover_url: String,
    pub content: String,
    pub audio_summary_url: String,
    pub tags: Option<Vec<String>>,
}
