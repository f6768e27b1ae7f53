// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Dashboard counters derived from first-page listing metadata.
///
/// These are never stored by the backend; they are recomputed on every
/// refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    /// Total books known to the backend.
    pub total_books: u64,
    /// Total loans known to the backend.
    pub total_loans: u64,
    /// Total users. The backend does not expose this, so it stays 0.
    pub total_users: u64,
}

/// The authenticated account behind the bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user identifier.
    pub id: u64,
    /// The display name.
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    /// The contact email, when exposed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
