// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scripted in-memory backend.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use biblio_domain::{
    Book, BookData, FilterSet, Loan, LoanStatus, NewLoan, Page, PageNumber, PaginationLink, User,
};
use biblio_gateway::{GatewayError, LibraryApi};
use time::macros::date;
use tokio::sync::oneshot;

use crate::ViewStateController;

/// Which fake operation a scripted failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListBooks,
    ListLoans,
    CreateLoan,
    ReturnLoan,
}

/// A call the controller made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListBooks {
        page: u32,
        filters: Vec<(String, String)>,
    },
    ListLoans {
        page: u32,
    },
    CreateLoan(NewLoan),
    ReturnLoan(u64),
}

/// A request the fake can hold back until released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Gate {
    BooksPage(u32),
    LoansPage(u32),
    CreateLoan,
}

#[derive(Default)]
struct FakeInner {
    calls: Vec<Call>,
    failures: HashMap<Endpoint, VecDeque<GatewayError>>,
    gates: HashMap<Gate, oneshot::Receiver<()>>,
    book_total: u64,
    loan_total: u64,
}

/// A backend whose listings are derived from the request and whose
/// failures are scripted per endpoint.
#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<FakeInner>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the totals reported on every listing page.
    pub fn with_totals(self, books: u64, loans: u64) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.book_total = books;
            inner.loan_total = loans;
        }
        self
    }

    /// Makes the next call to `endpoint` fail with `error`.
    pub fn fail_next(&self, endpoint: Endpoint, error: GatewayError) {
        self.inner
            .lock()
            .unwrap()
            .failures
            .entry(endpoint)
            .or_default()
            .push_back(error);
    }

    /// Makes the next listing of book page `page` wait until the returned
    /// sender fires.
    pub fn hold_books_page(&self, page: u32) -> oneshot::Sender<()> {
        self.hold(Gate::BooksPage(page))
    }

    /// Makes the next listing of loan page `page` wait until the returned
    /// sender fires.
    pub fn hold_loans_page(&self, page: u32) -> oneshot::Sender<()> {
        self.hold(Gate::LoansPage(page))
    }

    /// Makes the next loan creation wait until the returned sender fires.
    pub fn hold_create_loan(&self) -> oneshot::Sender<()> {
        self.hold(Gate::CreateLoan)
    }

    fn hold(&self, gate: Gate) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().unwrap().gates.insert(gate, rx);
        tx
    }

    /// Waits for the release of `gate` if a test is holding it.
    async fn pass(&self, gate: Gate) {
        let held: Option<oneshot::Receiver<()>> = self.inner.lock().unwrap().gates.remove(&gate);
        if let Some(release) = held {
            release.await.unwrap();
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    fn record(&self, call: Call, endpoint: Endpoint) -> Result<(), GatewayError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        match inner
            .failures
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn totals(&self) -> (u64, u64) {
        let inner = self.inner.lock().unwrap();
        (inner.book_total, inner.loan_total)
    }
}

pub fn page(number: u32) -> PageNumber {
    PageNumber::new(number).unwrap()
}

pub fn link(resource: &str, target: Option<u32>, label: &str) -> PaginationLink {
    PaginationLink {
        url: target.map(|page| format!("http://localhost:8000/api/{resource}?page={page}")),
        label: String::from(label),
        active: false,
    }
}

fn links(resource: &str, current: u32) -> Vec<PaginationLink> {
    let previous: Option<u32> = current.checked_sub(1).filter(|page| *page >= 1);
    vec![
        link(resource, previous, "&laquo; Anterior"),
        PaginationLink {
            url: Some(format!("http://localhost:8000/api/{resource}?page={current}")),
            label: current.to_string(),
            active: true,
        },
        link(resource, Some(current + 1), "Siguiente &raquo;"),
    ]
}

pub fn transport_error() -> GatewayError {
    GatewayError::Transport {
        base_url: String::from("http://localhost:8000"),
        detail: String::from("connection refused"),
    }
}

/// Title the fake gives the single book on a listing page.
pub fn book_title(page: u32, filters: &FilterSet) -> String {
    let described: Vec<String> = filters
        .query_pairs()
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    format!("page {page} [{}]", described.join(","))
}

fn fake_loan(id: u64, status: LoanStatus) -> Loan {
    Loan {
        id,
        user_id: 3,
        book_id: 7,
        loan_date: date!(2026 - 03 - 01),
        estimated_return_date: date!(2026 - 03 - 15),
        actual_return_date: None,
        status,
        user: None,
        book: None,
    }
}

impl LibraryApi for FakeApi {
    async fn list_books(
        &self,
        page: PageNumber,
        filters: &FilterSet,
    ) -> Result<Page<Book>, GatewayError> {
        let filter_pairs: Vec<(String, String)> = filters
            .query_pairs()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        self.pass(Gate::BooksPage(page.get())).await;
        self.record(
            Call::ListBooks {
                page: page.get(),
                filters: filter_pairs,
            },
            Endpoint::ListBooks,
        )?;

        Ok(Page {
            data: vec![Book {
                id: u64::from(page.get()),
                title: book_title(page.get(), filters),
                authors: Vec::new(),
                publication_year: 2000,
                available_stock: 1,
            }],
            links: links("libros", page.get()),
            total: self.totals().0,
        })
    }

    async fn get_book(&self, id: u64) -> Result<Book, GatewayError> {
        Err(GatewayError::NotFound {
            message: format!("book {id} is not scripted"),
        })
    }

    async fn create_book(&self, _data: &BookData) -> Result<Book, GatewayError> {
        Err(GatewayError::Server {
            message: String::from("not scripted"),
        })
    }

    async fn update_book(&self, _id: u64, _data: &BookData) -> Result<Book, GatewayError> {
        Err(GatewayError::Server {
            message: String::from("not scripted"),
        })
    }

    async fn delete_book(&self, _id: u64) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn list_loans(&self, page: PageNumber) -> Result<Page<Loan>, GatewayError> {
        self.pass(Gate::LoansPage(page.get())).await;
        self.record(Call::ListLoans { page: page.get() }, Endpoint::ListLoans)?;
        Ok(Page {
            data: vec![fake_loan(u64::from(page.get()) * 100, LoanStatus::Pending)],
            links: links("prestamos", page.get()),
            total: self.totals().1,
        })
    }

    async fn create_loan(&self, loan: &NewLoan) -> Result<Loan, GatewayError> {
        self.pass(Gate::CreateLoan).await;
        self.record(Call::CreateLoan(loan.clone()), Endpoint::CreateLoan)?;
        Ok(fake_loan(999, LoanStatus::Pending))
    }

    async fn return_loan(&self, id: u64) -> Result<Loan, GatewayError> {
        self.record(Call::ReturnLoan(id), Endpoint::ReturnLoan)?;
        let mut loan: Loan = fake_loan(id, LoanStatus::Returned);
        loan.actual_return_date = Some(date!(2026 - 03 - 10));
        Ok(loan)
    }

    async fn current_user(&self) -> Result<User, GatewayError> {
        Ok(User {
            id: 1,
            name: String::from("Desk"),
            email: None,
        })
    }
}

/// A controller over a fake that has already completed its first load.
pub async fn mounted_controller(api: FakeApi) -> ViewStateController<FakeApi> {
    let controller: ViewStateController<FakeApi> = ViewStateController::new(api);
    controller.refresh(crate::RefreshTrigger::Mount).await;
    controller.api().clear_calls();
    controller
}

/// The calls made by one full refresh cycle.
pub fn full_cycle_calls(books_page: u32, filters: &[(&str, &str)]) -> Vec<Call> {
    vec![
        Call::ListBooks {
            page: books_page,
            filters: filters
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        },
        Call::ListLoans { page: 1 },
        Call::ListBooks {
            page: 1,
            filters: Vec::new(),
        },
        Call::ListLoans { page: 1 },
    ]
}
