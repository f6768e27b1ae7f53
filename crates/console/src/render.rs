// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of the view state.

use std::fmt::Write;

use biblio_domain::{Book, LibraryStats, Loan, PaginationLink, User, wire_date};
use biblio_view::{MessageKind, MutationOutcome, TransientMessage, ViewState};

/// Shown in place of an empty listing.
const NOTHING_TO_SHOW: &str = "  (none)";

/// Formats the page-level error line.
pub fn error_line(message: &str) -> String {
    format!("error: {message}")
}

/// Formats a transient message.
pub fn message_line(message: &TransientMessage) -> String {
    let tag: &str = match message.kind {
        MessageKind::Success => "ok",
        MessageKind::Error => "failed",
    };
    format!("[{tag}] {}", message.text)
}

/// Formats a pagination bar. The active page is bracketed and disabled
/// links are parenthesized.
pub fn links(links: &[PaginationLink]) -> String {
    links
        .iter()
        .map(|link| {
            let label: String = link.display_label();
            if link.active {
                format!("[{label}]")
            } else if link.is_enabled() {
                label
            } else {
                format!("({label})")
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn book_line(book: &Book) -> String {
    let names: String = book.author_names();
    let authors: &str = if names.is_empty() { "-" } else { &names };
    format!(
        "  #{:<5} {:<40} {:<30} {:>5}  stock {}",
        book.id,
        book.title,
        authors,
        book.publication_year,
        book.available_stock,
    )
}

fn loan_line(loan: &Loan) -> String {
    let returned: String = loan
        .actual_return_date
        .map_or_else(|| String::from("-"), wire_date::format);
    format!(
        "  #{:<5} {:<25} {:<40} {} -> {}  returned {}  {}",
        loan.id,
        loan.user_name(),
        loan.book_title(),
        wire_date::format(loan.loan_date),
        wire_date::format(loan.estimated_return_date),
        returned,
        loan.status,
    )
}

/// Formats the dashboard counters.
pub fn stats(stats: &LibraryStats) -> String {
    format!(
        "Books: {}  Loans: {}  Users: {}",
        stats.total_books, stats.total_loans, stats.total_users
    )
}

/// Formats the account behind the token.
pub fn user(user: &User) -> String {
    match &user.email {
        Some(email) => format!("#{} {} <{email}>", user.id, user.name),
        None => format!("#{} {}", user.id, user.name),
    }
}

/// Formats the books listing with its pagination bar.
pub fn books_section(state: &ViewState) -> String {
    let mut out: String = format!("Books (page {})", state.books_page);
    let filters: Vec<String> = state
        .filters
        .query_pairs()
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    if !filters.is_empty() {
        let _ = write!(out, " filtered by {}", filters.join(", "));
    }
    out.push('\n');
    push_lines(&mut out, state.snapshot.books.iter().map(book_line));
    let _ = write!(out, "  {}", links(&state.snapshot.book_links));
    out
}

/// Formats the loans listing with its pagination bar.
pub fn loans_section(state: &ViewState) -> String {
    let mut out: String = format!("Loans (page {})\n", state.loans_page);
    push_lines(&mut out, state.snapshot.loans.iter().map(loan_line));
    let _ = write!(out, "  {}", links(&state.snapshot.loan_links));
    if let Some(error) = &state.error {
        let _ = write!(out, "\n{}", error_line(error));
    }
    out
}

/// Formats the whole view: counters, books, loans, then any error or
/// message.
pub fn dashboard(state: &ViewState) -> String {
    let mut out: String = stats(&state.snapshot.stats);
    let _ = write!(
        out,
        "\n\n{}\n\n{}",
        books_section(state),
        loans_section(state)
    );
    if let Some(message) = &state.message {
        let _ = write!(out, "\n{}", message_line(message));
    }
    out
}

/// Formats the result of a loan mutation.
///
/// A rejected mutation shows only its message; an accepted one also shows
/// the refreshed dashboard.
pub fn mutation(state: &ViewState, outcome: &MutationOutcome) -> String {
    match outcome {
        MutationOutcome::Accepted(_) => dashboard(state),
        MutationOutcome::Rejected => state
            .message
            .as_ref()
            .map_or_else(String::new, message_line),
    }
}

fn push_lines(out: &mut String, lines: impl Iterator<Item = String>) {
    let mut any: bool = false;
    for line in lines {
        out.push_str(&line);
        out.push('\n');
        any = true;
    }
    if !any {
        out.push_str(NOTHING_TO_SHOW);
        out.push('\n');
    }
}
