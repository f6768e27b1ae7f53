// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::wire_date;
use serde::{Deserialize, Serialize};
use time::Date;

/// Placeholder shown when a loan arrives without its embedded summaries.
const NOT_AVAILABLE: &str = "N/A";

/// The lifecycle status of a loan.
///
/// Status is computed by the backend; the client never sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    /// Lent and still within its estimated return date.
    #[serde(rename = "pendiente", alias = "pending")]
    Pending,
    /// Lent and past its estimated return date.
    #[serde(rename = "atrasado", alias = "overdue")]
    Overdue,
    /// Returned to the library.
    #[serde(rename = "devuelto", alias = "returned")]
    Returned,
}

impl LoanStatus {
    /// Returns the English label for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::Returned => "returned",
        }
    }

    /// Returns whether a return can still be registered.
    #[must_use]
    pub const fn is_returnable(&self) -> bool {
        !matches!(self, Self::Returned)
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The borrowing user as embedded in a loan record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanUserSummary {
    /// The user identifier.
    pub id: u64,
    /// The user's display name.
    #[serde(rename = "nombre")]
    pub name: String,
}

/// The lent book as embedded in a loan record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanBookSummary {
    /// The book identifier.
    pub id: u64,
    /// The book title.
    #[serde(rename = "titulo")]
    pub title: String,
}

/// A loan of one book to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// The backend identifier.
    pub id: u64,
    /// The borrowing user.
    #[serde(rename = "usuario_id")]
    pub user_id: u64,
    /// The lent book.
    #[serde(rename = "libro_id")]
    pub book_id: u64,
    /// The date the book was lent.
    #[serde(rename = "fecha_prestamo", with = "wire_date")]
    pub loan_date: Date,
    /// The date the book is expected back.
    #[serde(rename = "fecha_devolucion_estimada", with = "wire_date")]
    pub estimated_return_date: Date,
    /// The date the book actually came back, once returned.
    #[serde(
        rename = "fecha_devolucion_real",
        with = "wire_date::option",
        default
    )]
    pub actual_return_date: Option<Date>,
    /// Backend-computed status.
    #[serde(rename = "estado")]
    pub status: LoanStatus,
    /// Embedded user summary, when the backend eager-loads it.
    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<LoanUserSummary>,
    /// Embedded book summary, when the backend eager-loads it.
    #[serde(rename = "libro", default, skip_serializing_if = "Option::is_none")]
    pub book: Option<LoanBookSummary>,
}

impl Loan {
    /// Returns the borrower's name, or "N/A" when not embedded.
    #[must_use]
    pub fn user_name(&self) -> &str {
        self.user
            .as_ref()
            .map_or(NOT_AVAILABLE, |user| user.name.as_str())
    }

    /// Returns the lent book's title, or "N/A" when not embedded.
    #[must_use]
    pub fn book_title(&self) -> &str {
        self.book
            .as_ref()
            .map_or(NOT_AVAILABLE, |book| book.title.as_str())
    }
}
