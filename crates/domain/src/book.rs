// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// An author as embedded in a book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// The backend identifier, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// The author's first name.
    #[serde(rename = "nombre")]
    pub first_name: String,
    /// The author's last name.
    #[serde(rename = "apellido")]
    pub last_name: String,
}

impl Author {
    /// Returns "First Last", trimmed when either part is empty.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A book as listed by the backend.
///
/// The client only ever holds a read-only, page-scoped copy of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// The backend identifier.
    pub id: u64,
    /// The book title.
    #[serde(rename = "titulo")]
    pub title: String,
    /// The book authors, in backend order.
    #[serde(rename = "autores", default)]
    pub authors: Vec<Author>,
    /// The publication year.
    #[serde(rename = "año_publicacion")]
    pub publication_year: i32,
    /// Copies currently available for loan.
    #[serde(rename = "stock_disponible")]
    pub available_stock: u32,
}

impl Book {
    /// Returns the author names joined with ", ".
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(Author::full_name)
            .collect::<Vec<String>>()
            .join(", ")
    }

    /// Returns whether at least one copy can be lent.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available_stock > 0
    }
}

/// Payload used to create or update a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookData {
    /// The book title.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Identifiers of the book's authors.
    #[serde(rename = "autores", default, skip_serializing_if = "Vec::is_empty")]
    pub author_ids: Vec<u64>,
    /// The publication year.
    #[serde(rename = "año_publicacion")]
    pub publication_year: i32,
    /// Copies available for loan.
    #[serde(rename = "stock_disponible")]
    pub available_stock: u32,
}

impl BookData {
    /// Checks that the required fields are present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if the title is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::MissingField { field: "titulo" });
        }
        Ok(())
    }
}
