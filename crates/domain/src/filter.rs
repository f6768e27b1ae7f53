// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A field the book listing can be filtered on.
///
/// Variant order is the order keys are sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    /// Title substring.
    Title,
    /// Author name substring.
    Author,
    /// Publication year.
    Year,
}

impl FilterKey {
    /// Every filter key, in wire order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Author, Self::Year];

    /// Returns the query parameter name the backend expects.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "titulo",
            Self::Author => "autor",
            Self::Year => "año",
        }
    }
}

impl FromStr for FilterKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "titulo" | "title" => Ok(Self::Title),
            "autor" | "author" => Ok(Self::Author),
            "año" | "year" => Ok(Self::Year),
            _ => Err(DomainError::UnknownFilterKey(s.to_string())),
        }
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active constraints on the book listing.
///
/// A key that is absent places no constraint. Blank values are never
/// stored, so every stored key is sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Constraint values by key.
    values: BTreeMap<FilterKey, String>,
}

impl FilterSet {
    /// Creates an empty filter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Returns a copy of this set with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: FilterKey, value: &str) -> Self {
        self.set(key, value);
        self
    }

    /// Replaces the value for `key`. A blank value removes the key.
    pub fn set(&mut self, key: FilterKey, value: &str) {
        if value.trim().is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value.to_string());
        }
    }

    /// Removes the constraint on `key`.
    pub fn remove(&mut self, key: FilterKey) {
        self.values.remove(&key);
    }

    /// Removes every constraint.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns the value for `key`, if constrained.
    #[must_use]
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Returns whether no key is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of constrained keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `(wire key, value)` pairs in wire order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }
}
