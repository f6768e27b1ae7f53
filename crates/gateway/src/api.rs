// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::future::Future;

use biblio_domain::{
    Book, BookData, FilterSet, LibraryStats, Loan, NewLoan, Page, PageNumber, User,
};

use crate::error::GatewayError;

/// The operations the loan desk needs from the backend.
///
/// `GatewayClient` implements this over HTTP. The view controller only
/// depends on this trait.
pub trait LibraryApi: Send + Sync {
    /// Lists one page of books matching `filters`.
    fn list_books(
        &self,
        page: PageNumber,
        filters: &FilterSet,
    ) -> impl Future<Output = Result<Page<Book>, GatewayError>> + Send;

    /// Fetches a single book.
    fn get_book(&self, id: u64) -> impl Future<Output = Result<Book, GatewayError>> + Send;

    /// Creates a book.
    fn create_book(
        &self,
        data: &BookData,
    ) -> impl Future<Output = Result<Book, GatewayError>> + Send;

    /// Replaces a book's data.
    fn update_book(
        &self,
        id: u64,
        data: &BookData,
    ) -> impl Future<Output = Result<Book, GatewayError>> + Send;

    /// Deletes a book.
    fn delete_book(&self, id: u64) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Lists one page of loans.
    fn list_loans(
        &self,
        page: PageNumber,
    ) -> impl Future<Output = Result<Page<Loan>, GatewayError>> + Send;

    /// Registers a loan.
    fn create_loan(
        &self,
        loan: &NewLoan,
    ) -> impl Future<Output = Result<Loan, GatewayError>> + Send;

    /// Marks a loan as returned today.
    fn return_loan(&self, id: u64) -> impl Future<Output = Result<Loan, GatewayError>> + Send;

    /// Fetches the account behind the credential.
    fn current_user(&self) -> impl Future<Output = Result<User, GatewayError>> + Send;

    /// Derives dashboard counters from the first page of books and loans.
    ///
    /// Both listings are fetched concurrently and independently of any
    /// other call. If either fails, the whole query fails with that error;
    /// partial stats are never returned.
    fn get_stats(&self) -> impl Future<Output = Result<LibraryStats, GatewayError>> + Send {
        async move {
            let no_filters: FilterSet = FilterSet::new();
            let (books, loans) = futures::try_join!(
                self.list_books(PageNumber::FIRST, &no_filters),
                self.list_loans(PageNumber::FIRST),
            )?;
            Ok(LibraryStats {
                total_books: books.total,
                total_loans: loans.total,
                total_users: 0,
            })
        }
    }
}
