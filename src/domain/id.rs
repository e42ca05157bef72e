//! Numeric identifiers for items and categories
//!
//! ID Format:
//! - Item IDs: positive integers, displayed as `#{n}` (e.g., `#3`)
//! - Category IDs: same shape, separate id space
//!
//! Both parse from either `3` or `#3`. Ids are handed out by an
//! [`IdSequence`] owned by the manager, so two managers never share a
//! counter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid id: expected a positive number like '3' or '#3', got '{0}'")]
    Invalid(String),
}

fn parse_raw(s: &str) -> Result<u32, IdError> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    match digits.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(IdError::Invalid(trimmed.to_string())),
    }
}

macro_rules! numeric_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub fn new(value: u32) -> Self {
                Self(value)
            }

            /// Returns the raw numeric value
            pub fn value(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_raw(s).map(Self)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a todo item, unique within one manager
    ItemId
);

numeric_id!(
    /// Identifier of a category, unique within one manager
    CategoryId
);

/// Monotonic counter starting at 1
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u32,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the value the next call to `advance` will hand out
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Hands out the current value and moves the counter forward
    pub fn advance(&mut self) -> u32 {
        let value = self.next;
        self.next += 1;
        value
    }

    /// Restarts the counter at 1
    ///
    /// Only safe once every id handed out so far has been discarded.
    pub fn reset(&mut self) {
        self.next = 1;
    }
}
