// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A field of the loan registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanFormField {
    /// The borrowing user's identifier.
    UserId,
    /// The lent book's identifier.
    BookId,
}

/// The loan registration form as typed by the librarian.
///
/// Values are kept verbatim; they are only checked on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanForm {
    /// The borrowing user's identifier.
    pub user_id: String,
    /// The lent book's identifier.
    pub book_id: String,
}

impl LoanForm {
    /// Creates a form pre-filled with the given values.
    #[must_use]
    pub fn new(user_id: &str, book_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
        }
    }

    /// Replaces one field.
    pub fn set(&mut self, field: LoanFormField, value: &str) {
        match field {
            LoanFormField::UserId => self.user_id = value.to_string(),
            LoanFormField::BookId => self.book_id = value.to_string(),
        }
    }

    /// Returns whether both fields are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_id.is_empty() && self.book_id.is_empty()
    }

    /// Checks that both fields are present and builds the request body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` for the first blank field.
    pub fn validate(&self) -> Result<NewLoan, DomainError> {
        let user_id: &str = self.user_id.trim();
        if user_id.is_empty() {
            return Err(DomainError::MissingField {
                field: "usuario_id",
            });
        }
        let book_id: &str = self.book_id.trim();
        if book_id.is_empty() {
            return Err(DomainError::MissingField { field: "libro_id" });
        }
        Ok(NewLoan {
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
        })
    }
}

/// Request body for registering a loan.
///
/// Identifiers are forwarded as typed; the backend validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLoan {
    /// The borrowing user's identifier.
    #[serde(rename = "usuario_id")]
    pub user_id: String,
    /// The lent book's identifier.
    #[serde(rename = "libro_id")]
    pub book_id: String,
}
