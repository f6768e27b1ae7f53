// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use biblio_domain::{
    Book, FilterKey, FilterSet, LibraryStats, Loan, LoanForm, LoanFormField, NewLoan, Page,
    PageNumber, PaginationLink,
};
use biblio_gateway::{GatewayError, LibraryApi};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::state::{
    LOAN_CREATED_MESSAGE, LOAN_RETURNED_MESSAGE, MessageKind, Snapshot, TransientMessage,
    ViewState,
};

/// Books, loans and stats fetched by one full cycle.
type CycleData = (Page<Book>, Page<Loan>, LibraryStats);

/// What started a full refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// First load of the view.
    Mount,
    /// A filter was edited. Always lists books from page 1.
    FilterChanged,
    /// A book pagination link was followed.
    BooksPage(PageNumber),
    /// A mutation went through. Lists the book page currently shown.
    AfterMutation,
}

/// How a refresh ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The new data replaced the snapshot.
    Applied,
    /// A call failed; the message is now the page-level error.
    Failed(String),
    /// A newer refresh started before this one finished; its result was
    /// dropped.
    Superseded,
}

/// How a loan mutation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The backend accepted the change and a refresh followed.
    Accepted(RefreshOutcome),
    /// The change was rejected; an error message was posted.
    Rejected,
}

/// The tickets one in-flight fetch holds.
#[derive(Debug, Clone, Copy)]
struct Tickets {
    /// Books and stats ticket. Only full cycles take one.
    books: Option<u64>,
    /// Loans ticket. Every fetch takes one.
    loans: u64,
}

/// Orchestrates backend calls and owns the view state.
///
/// Books and loans each have a monotonically increasing ticket counter. A
/// full cycle takes both tickets; a loans page fetch only takes a loans
/// ticket. A full cycle is dropped only when a newer full cycle started,
/// and then keeps its loans part only if no newer loans fetch started. A
/// loans page fetch is dropped when any newer fetch took a loans ticket.
#[derive(Debug)]
pub struct ViewStateController<A: LibraryApi> {
    /// The backend.
    api: A,
    /// The single writable copy of the view state.
    state: watch::Sender<ViewState>,
    /// The latest books ticket handed out.
    books_generation: AtomicU64,
    /// The latest loans ticket handed out.
    loans_generation: AtomicU64,
    /// Fetches started but not yet finished, stale ones included.
    in_flight: AtomicUsize,
}

impl<A: LibraryApi> ViewStateController<A> {
    /// Creates a controller with an empty view state.
    ///
    /// Nothing is fetched until [`Self::refresh`] is called.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: watch::Sender::new(ViewState::default()),
            books_generation: AtomicU64::new(0),
            loans_generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Returns the backend this controller talks to.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Returns a copy of the current view state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Returns a read-only handle that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Runs a full refresh cycle: books, then loans page 1, then stats.
    ///
    /// On success the snapshot is replaced as a whole. On failure the
    /// snapshot is left as it was and the first failure becomes the
    /// page-level error.
    pub async fn refresh(&self, trigger: RefreshTrigger) -> RefreshOutcome {
        let (page, filters) = {
            let state = self.state.borrow();
            let page: PageNumber = match trigger {
                RefreshTrigger::Mount | RefreshTrigger::FilterChanged => PageNumber::FIRST,
                RefreshTrigger::BooksPage(page) => page,
                RefreshTrigger::AfterMutation => state.books_page,
            };
            (page, state.filters.clone())
        };

        let tickets: Tickets = self.begin(true);
        info!(?trigger, page = page.get(), ?tickets, "Refresh started");

        let result: Result<CycleData, GatewayError> = self.fetch_cycle(page, &filters).await;

        self.finish(tickets, result, |state, (books, loans, stats), loans_current| {
            let mut fresh: Snapshot = Snapshot::from_pages(books, loans, stats);
            if loans_current {
                state.loans_page = PageNumber::FIRST;
            } else {
                debug!(?tickets, "Keeping the newer loans page");
                fresh.loans = std::mem::take(&mut state.snapshot.loans);
                fresh.loan_links = std::mem::take(&mut state.snapshot.loan_links);
            }
            state.snapshot = fresh;
            state.books_page = page;
        })
    }

    /// Fetches one page of loans, leaving books, filters and stats as they
    /// are.
    ///
    /// A full cycle already in flight is not dropped by this fetch; it
    /// still applies its books and stats when it finishes.
    pub async fn load_loans_page(&self, page: PageNumber) -> RefreshOutcome {
        let tickets: Tickets = self.begin(false);
        info!(page = page.get(), ?tickets, "Loan page refresh started");

        let result: Result<Page<Loan>, GatewayError> = self.api.list_loans(page).await;

        self.finish(tickets, result, |state, loans, _| {
            state.snapshot.loans = loans.data;
            state.snapshot.loan_links = loans.links;
            state.loans_page = page;
        })
    }

    /// Replaces one filter value and refreshes from page 1.
    ///
    /// A blank value removes the filter.
    pub async fn set_filter(&self, key: FilterKey, value: &str) -> RefreshOutcome {
        self.state.send_modify(|state| state.filters.set(key, value));
        self.refresh(RefreshTrigger::FilterChanged).await
    }

    /// Replaces the whole filter set at once and refreshes from page 1.
    pub async fn replace_filters(&self, filters: FilterSet) -> RefreshOutcome {
        self.state.send_modify(|state| state.filters = filters);
        self.refresh(RefreshTrigger::FilterChanged).await
    }

    /// Removes every filter and refreshes from page 1.
    pub async fn clear_filters(&self) -> RefreshOutcome {
        self.state.send_modify(|state| state.filters.clear());
        self.refresh(RefreshTrigger::FilterChanged).await
    }

    /// Follows a book pagination link.
    ///
    /// Returns `None` without fetching if the link is disabled or carries
    /// no page number.
    pub async fn paginate_books(&self, link: &PaginationLink) -> Option<RefreshOutcome> {
        let Some(page) = link.page_token() else {
            debug!(label = %link.label, "Ignoring book link without a target page");
            return None;
        };
        Some(self.refresh(RefreshTrigger::BooksPage(page)).await)
    }

    /// Follows a loan pagination link.
    ///
    /// Returns `None` without fetching if the link is disabled or carries
    /// no page number.
    pub async fn paginate_loans(&self, link: &PaginationLink) -> Option<RefreshOutcome> {
        let Some(page) = link.page_token() else {
            debug!(label = %link.label, "Ignoring loan link without a target page");
            return None;
        };
        Some(self.load_loans_page(page).await)
    }

    /// Edits one field of the loan form.
    pub fn set_loan_form_field(&self, field: LoanFormField, value: &str) {
        self.state
            .send_modify(|state| state.loan_form.set(field, value));
    }

    /// Submits the loan form.
    ///
    /// Blank fields are rejected without calling the backend. On success
    /// the form is cleared unless it was edited while the request was in
    /// flight, a success message is posted and a full refresh runs. On failure an error message is posted and the form and
    /// snapshot are left untouched.
    pub async fn submit_loan(&self) -> MutationOutcome {
        let form: LoanForm = self.state.borrow().loan_form.clone();
        let new_loan: NewLoan = match form.validate() {
            Ok(new_loan) => new_loan,
            Err(err) => {
                warn!(error = %err, "Loan form incomplete");
                self.post_message(MessageKind::Error, &err.to_string());
                return MutationOutcome::Rejected;
            }
        };

        match self.api.create_loan(&new_loan).await {
            Ok(loan) => {
                info!(loan_id = loan.id, book_id = loan.book_id, "Loan created");
                self.state.send_if_modified(|state| {
                    if state.loan_form == form {
                        state.loan_form = LoanForm::default();
                        true
                    } else {
                        debug!("Loan form edited during submission, keeping edits");
                        false
                    }
                });
                self.post_message(MessageKind::Success, LOAN_CREATED_MESSAGE);
                MutationOutcome::Accepted(self.refresh(RefreshTrigger::AfterMutation).await)
            }
            Err(err) => {
                warn!(error = %err, "Loan creation rejected");
                self.post_message(MessageKind::Error, &err.message());
                MutationOutcome::Rejected
            }
        }
    }

    /// Registers the return of a loan as of today.
    ///
    /// On success a success message is posted and a full refresh runs. On
    /// failure, including a loan that was already returned, an error
    /// message is posted and the snapshot is left untouched.
    pub async fn return_loan(&self, loan_id: u64) -> MutationOutcome {
        match self.api.return_loan(loan_id).await {
            Ok(loan) => {
                info!(loan_id = loan.id, status = %loan.status, "Loan returned");
                self.post_message(MessageKind::Success, LOAN_RETURNED_MESSAGE);
                MutationOutcome::Accepted(self.refresh(RefreshTrigger::AfterMutation).await)
            }
            Err(err) => {
                warn!(loan_id, error = %err, "Loan return rejected");
                self.post_message(MessageKind::Error, &err.message());
                MutationOutcome::Rejected
            }
        }
    }

    /// Shows a transient message, replacing any previous one.
    pub fn post_message(&self, kind: MessageKind, text: &str) {
        let message: TransientMessage = TransientMessage::new(kind, text, Instant::now());
        self.state.send_modify(|state| state.message = Some(message));
    }

    /// Returns the transient message if it has not expired yet.
    #[must_use]
    pub fn message(&self) -> Option<TransientMessage> {
        let now: Instant = Instant::now();
        self.state
            .borrow()
            .message
            .clone()
            .filter(|message| !message.is_expired(now))
    }

    /// Clears the transient message once it has expired.
    ///
    /// Returns whether a message was cleared.
    pub fn dismiss_expired(&self) -> bool {
        let now: Instant = Instant::now();
        self.state.send_if_modified(|state| {
            if state
                .message
                .as_ref()
                .is_some_and(|message| message.is_expired(now))
            {
                state.message = None;
                true
            } else {
                false
            }
        })
    }

    /// Issues the three calls of a full cycle in order, stopping at the
    /// first failure.
    async fn fetch_cycle(
        &self,
        page: PageNumber,
        filters: &FilterSet,
    ) -> Result<CycleData, GatewayError> {
        let books: Page<Book> = self.api.list_books(page, filters).await?;
        let loans: Page<Loan> = self.api.list_loans(PageNumber::FIRST).await?;
        let stats: LibraryStats = self.api.get_stats().await?;
        Ok((books, loans, stats))
    }

    /// Hands out tickets and enters the loading state.
    ///
    /// `full` cycles take a books ticket as well as a loans ticket.
    fn begin(&self, full: bool) -> Tickets {
        let mut tickets: Tickets = Tickets {
            books: None,
            loans: 0,
        };
        self.state.send_modify(|state| {
            tickets = Tickets {
                books: full.then(|| self.books_generation.fetch_add(1, Ordering::SeqCst) + 1),
                loans: self.loans_generation.fetch_add(1, Ordering::SeqCst) + 1,
            };
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
            state.error = None;
        });
        tickets
    }

    /// Applies a fetch result unless newer tickets superseded it.
    ///
    /// `apply` receives whether the loans ticket is still the latest. The
    /// loading flag stays set while any other fetch is in flight.
    fn finish<T>(
        &self,
        tickets: Tickets,
        result: Result<T, GatewayError>,
        apply: impl FnOnce(&mut ViewState, T, bool),
    ) -> RefreshOutcome {
        let mut outcome: RefreshOutcome = RefreshOutcome::Superseded;
        self.state.send_modify(|state| {
            let remaining: usize = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            state.loading = remaining > 0;

            let loans_current: bool = tickets.loans == self.loans_generation.load(Ordering::SeqCst);
            let superseded: bool = match tickets.books {
                Some(books) => books != self.books_generation.load(Ordering::SeqCst),
                None => !loans_current,
            };
            if superseded {
                debug!(?tickets, "Dropping superseded refresh result");
                return;
            }

            outcome = match result {
                Ok(value) => {
                    apply(state, value, loans_current);
                    info!(?tickets, "Refresh applied");
                    RefreshOutcome::Applied
                }
                Err(err) => {
                    let message: String = err.message();
                    warn!(?tickets, error = %message, "Refresh failed");
                    state.error = Some(message.clone());
                    RefreshOutcome::Failed(message)
                }
            };
        });
        outcome
    }
}
