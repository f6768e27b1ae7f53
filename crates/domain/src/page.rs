// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// Base that relative link targets are resolved against. Only the query
/// of the resolved URL is read.
const RELATIVE_LINK_BASE: &str = "http://localhost/";

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Creates a new `PageNumber`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPageNumber` for 0.
    pub const fn new(page: u32) -> Result<Self, DomainError> {
        if page >= 1 {
            Ok(Self(page))
        } else {
            Err(DomainError::InvalidPageNumber(page))
        }
    }

    /// Returns the page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = DomainError;

    fn try_from(page: u32) -> Result<Self, Self::Error> {
        Self::new(page)
    }
}

impl From<PageNumber> for u32 {
    fn from(page: PageNumber) -> Self {
        page.0
    }
}

impl std::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One navigable entry of the backend's pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLink {
    /// Target URL, or `None` when the target is unavailable.
    pub url: Option<String>,
    /// Human-readable label (page number or previous/next marker).
    pub label: String,
    /// Whether this link points at the page being shown.
    #[serde(default)]
    pub active: bool,
}

impl PaginationLink {
    /// Returns whether the link can be followed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Resolves the `page` query parameter of the link target.
    ///
    /// Returns `None` for disabled links and for targets without a
    /// valid page number.
    #[must_use]
    pub fn page_token(&self) -> Option<PageNumber> {
        let target: &str = self.url.as_deref()?;
        let resolved: Url = Url::parse(RELATIVE_LINK_BASE).ok()?.join(target).ok()?;
        resolved
            .query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse::<u32>().ok())
            .and_then(|page| PageNumber::new(page).ok())
    }

    /// Returns the label with the backend's HTML arrow entities replaced.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.label
            .replace("&laquo; Anterior", "← Previous")
            .replace("&laquo; Previous", "← Previous")
            .replace("Siguiente &raquo;", "Next →")
            .replace("Next &raquo;", "Next →")
    }
}

/// One page of a backend listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// The items on this page, in backend order.
    #[serde(default)]
    pub data: Vec<T>,
    /// Pagination links for navigating the listing.
    #[serde(default)]
    pub links: Vec<PaginationLink>,
    /// Total number of items across all pages.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total: u64,
}

/// Treats a `null` total the same as a missing one.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

impl<T> Page<T> {
    /// Creates an empty page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            links: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
