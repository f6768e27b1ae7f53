// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! View state for the loan desk.
//!
//! [`ViewStateController`] owns the only writable copy of [`ViewState`].
//! Presentation code reads it through [`ViewStateController::state`] or a
//! [`tokio::sync::watch::Receiver`] and drives changes through the
//! controller's transition functions.

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

mod controller;
mod state;

#[cfg(test)]
mod tests;

pub use controller::{MutationOutcome, RefreshOutcome, RefreshTrigger, ViewStateController};
pub use state::{
    LOAN_CREATED_MESSAGE, LOAN_RETURNED_MESSAGE, MESSAGE_TTL, MessageKind, Snapshot,
    TransientMessage, ViewState,
};
