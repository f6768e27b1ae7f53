// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while building domain values on the client side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Page numbers start at 1.
    InvalidPageNumber(u32),
    /// The filter key is not one the backend understands.
    UnknownFilterKey(String),
    /// A required field was left blank.
    MissingField {
        /// The wire name of the missing field.
        field: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPageNumber(page) => {
                write!(f, "Invalid page number: {page}. Pages start at 1")
            }
            Self::UnknownFilterKey(key) => write!(f, "Unknown filter key: '{key}'"),
            Self::MissingField { field } => write!(f, "The field '{field}' is required"),
        }
    }
}

impl std::error::Error for DomainError {}
