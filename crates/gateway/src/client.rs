// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP implementation of [`LibraryApi`].

use biblio_domain::{
    Book, BookData, FilterSet, Loan, NewLoan, Page, PageNumber, User,
};
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::LibraryApi;
use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// Body of the return endpoint.
#[derive(Debug, Serialize)]
struct ReturnLoanBody {
    /// Date the book came back, `YYYY-MM-DD`.
    fecha_devolucion_real: String,
}

/// Single-record responses arrive either bare or wrapped in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Record<T> {
    /// `{ "data": { ... } }`
    Wrapped {
        /// The record.
        data: T,
    },
    /// `{ ... }`
    Bare(T),
}

impl<T> Record<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Returns today's local calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn today_local() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Client for the library backend.
///
/// Attaches `Accept: application/json` and the bearer credential to every
/// request and classifies every failure into a [`GatewayError`].
#[derive(Debug, Clone)]
pub struct GatewayClient {
    /// Shared connection pool.
    http: reqwest::Client,
    /// Origin and credential.
    config: GatewayConfig,
}

impl GatewayClient {
    /// Creates a client for the given configuration.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Starts an authenticated request against an endpoint path.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.endpoint(path))
            .header(ACCEPT, "application/json")
            .bearer_auth(self.config.token())
    }

    /// Maps a reqwest error raised before a response arrived.
    fn transport(&self, err: &reqwest::Error) -> GatewayError {
        warn!(base_url = self.config.base_url(), error = %err, "Backend unreachable");
        GatewayError::Transport {
            base_url: self.config.base_url().to_string(),
            detail: err.to_string(),
        }
    }

    /// Sends a request and returns the raw body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if no response arrived, or the
    /// classified HTTP failure for any non-2xx status.
    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let request: reqwest::Request = builder.build().map_err(|e| self.transport(&e))?;
        let method: Method = request.method().clone();
        let path: String = request.url().path().to_string();
        debug!(%method, path = %path, query = request.url().query(), "Sending request");

        let response: reqwest::Response = self
            .http
            .execute(request)
            .await
            .map_err(|e| self.transport(&e))?;
        let status: reqwest::StatusCode = response.status();
        let body: Vec<u8> = response
            .bytes()
            .await
            .map_err(|e| self.transport(&e))?
            .to_vec();

        if !status.is_success() {
            let err: GatewayError = GatewayError::from_response(status.as_u16(), &body);
            warn!(%method, path = %path, status = status.as_u16(), error = %err, "Request failed");
            return Err(err);
        }

        debug!(%method, path = %path, status = status.as_u16(), "Request succeeded");
        Ok(body)
    }

    /// Sends a request and decodes the JSON body.
    async fn fetch<R: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<R, GatewayError> {
        let body: Vec<u8> = self.send(builder).await?;
        serde_json::from_slice::<R>(&body).map_err(|e| {
            warn!(error = %e, "Response did not match the expected shape");
            GatewayError::Decode {
                detail: e.to_string(),
            }
        })
    }

    /// Sends a request whose response is a single record.
    async fn fetch_record<R: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<R, GatewayError> {
        self.fetch::<Record<R>>(builder)
            .await
            .map(Record::into_inner)
    }
}

impl LibraryApi for GatewayClient {
    async fn list_books(
        &self,
        page: PageNumber,
        filters: &FilterSet,
    ) -> Result<Page<Book>, GatewayError> {
        let page_value: String = page.to_string();
        let mut query: Vec<(&str, &str)> = vec![("page", page_value.as_str())];
        query.extend(filters.query_pairs());
        self.fetch(self.request(Method::GET, "/libros").query(&query))
            .await
    }

    async fn get_book(&self, id: u64) -> Result<Book, GatewayError> {
        self.fetch_record(self.request(Method::GET, &format!("/libros/{id}")))
            .await
    }

    async fn create_book(&self, data: &BookData) -> Result<Book, GatewayError> {
        self.fetch_record(self.request(Method::POST, "/libros").json(data))
            .await
    }

    async fn update_book(&self, id: u64, data: &BookData) -> Result<Book, GatewayError> {
        self.fetch_record(
            self.request(Method::PUT, &format!("/libros/{id}"))
                .json(data),
        )
        .await
    }

    async fn delete_book(&self, id: u64) -> Result<(), GatewayError> {
        self.send(self.request(Method::DELETE, &format!("/libros/{id}")))
            .await
            .map(|_| ())
    }

    async fn list_loans(&self, page: PageNumber) -> Result<Page<Loan>, GatewayError> {
        let page_value: String = page.to_string();
        self.fetch(
            self.request(Method::GET, "/prestamos")
                .query(&[("page", page_value.as_str())]),
        )
        .await
    }

    async fn create_loan(&self, loan: &NewLoan) -> Result<Loan, GatewayError> {
        self.fetch_record(self.request(Method::POST, "/prestamos").json(loan))
            .await
    }

    async fn return_loan(&self, id: u64) -> Result<Loan, GatewayError> {
        let body: ReturnLoanBody = ReturnLoanBody {
            fecha_devolucion_real: today_local(),
        };
        self.fetch_record(
            self.request(Method::PUT, &format!("/prestamos/{id}/devolver"))
                .json(&body),
        )
        .await
    }

    async fn current_user(&self) -> Result<User, GatewayError> {
        self.fetch_record(self.request(Method::GET, "/user"))
            .await
    }
}
