// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed client for the library REST backend.
//!
//! Every operation returns `Result<_, GatewayError>`; transport and HTTP
//! failures are classified into a single error type carrying one
//! human-readable message.

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
#![allow(clippy::multiple_crate_versions)]

mod api;
mod client;
mod config;
mod error;

#[cfg(test)]
mod tests;

pub use api::LibraryApi;
pub use client::{GatewayClient, today_local};
pub use config::{API_PREFIX, DEFAULT_BASE_URL, GatewayConfig};
pub use error::GatewayError;
