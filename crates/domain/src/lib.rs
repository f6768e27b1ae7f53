// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod book;
mod error;
mod filter;
mod loan;
mod page;
mod stats;
mod validation;
pub mod wire_date;

#[cfg(test)]
mod tests;

// Re-export public types
pub use book::{Author, Book, BookData};
pub use error::DomainError;
pub use filter::{FilterKey, FilterSet};
pub use loan::{Loan, LoanBookSummary, LoanStatus, LoanUserSummary};
pub use page::{Page, PageNumber, PaginationLink};
pub use stats::{LibraryStats, User};
pub use validation::{LoanForm, LoanFormField, NewLoan};
