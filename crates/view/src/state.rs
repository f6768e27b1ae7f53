// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

use biblio_domain::{
    Book, FilterSet, LibraryStats, Loan, LoanForm, Page, PageNumber, PaginationLink,
};
use tokio::time::Instant;

/// How long a transient message stays visible.
pub const MESSAGE_TTL: Duration = Duration::from_secs(4);

/// Posted after a loan is registered.
pub const LOAN_CREATED_MESSAGE: &str = "Loan created successfully.";

/// Posted after a loan is closed.
pub const LOAN_RETURNED_MESSAGE: &str = "Book returned successfully.";

/// Everything displayed from the backend.
///
/// Replaced as a whole by a successful refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Books on the current page.
    pub books: Vec<Book>,
    /// Pagination links for the book listing.
    pub book_links: Vec<PaginationLink>,
    /// Loans on the current page.
    pub loans: Vec<Loan>,
    /// Pagination links for the loan listing.
    pub loan_links: Vec<PaginationLink>,
    /// Dashboard counters.
    pub stats: LibraryStats,
}

impl Snapshot {
    /// Builds a snapshot from the three results of one refresh cycle.
    #[must_use]
    pub fn from_pages(books: Page<Book>, loans: Page<Loan>, stats: LibraryStats) -> Self {
        Self {
            books: books.data,
            book_links: books.links,
            loans: loans.data,
            loan_links: loans.links,
            stats,
        }
    }
}

/// The kind of a transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// An operation went through.
    Success,
    /// An operation was rejected.
    Error,
}

/// A short-lived notification, distinct from the page-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    /// Success or error.
    pub kind: MessageKind,
    /// The text shown to the librarian.
    pub text: String,
    /// When the message stops being shown.
    pub expires_at: Instant,
}

impl TransientMessage {
    /// Creates a message that expires [`MESSAGE_TTL`] after `now`.
    #[must_use]
    pub fn new(kind: MessageKind, text: &str, now: Instant) -> Self {
        Self {
            kind,
            text: text.to_string(),
            expires_at: now + MESSAGE_TTL,
        }
    }

    /// Returns whether the message is past its expiry at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// The view-facing state of the loan desk.
///
/// Only [`crate::ViewStateController`] writes this; everyone else reads
/// clones of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Data from the last successful refresh.
    pub snapshot: Snapshot,
    /// Active book filters.
    pub filters: FilterSet,
    /// Book page the snapshot shows.
    pub books_page: PageNumber,
    /// Loan page the snapshot shows.
    pub loans_page: PageNumber,
    /// The loan registration form.
    pub loan_form: LoanForm,
    /// The current transient message, if any.
    pub message: Option<TransientMessage>,
    /// Whether a refresh is in flight.
    pub loading: bool,
    /// The page-level error from the last failed refresh.
    pub error: Option<String>,
}
