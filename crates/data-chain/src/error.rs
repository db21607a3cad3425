//! Navigation diagnostics.
//!
//! Structural failures (missing key, index out of range, wrong shape) are the
//! only errors this crate surfaces. In safe mode they are accumulated on a
//! [`Diagnostics`] slot shared by every node derived from one root, so a
//! whole navigation chain can run to completion before the caller looks at
//! what went wrong.

use std::cell::RefCell;
use thiserror::Error;

/// A single structural navigation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The key was missing from the mapping, or mapped to null.
    #[error("key `{0}` does not exist")]
    MissingKey(String),

    /// `field` was called on a value that is not a mapping.
    #[error("map with key `{0}` does not exist")]
    NotAMap(String),

    /// `index` was called with an index past the end of the sequence.
    #[error("index out of range: `{0}`")]
    IndexOutOfRange(usize),

    /// `index` was called on a value that is not a sequence.
    #[error("not an array: `{0}`")]
    NotAnArray(&'static str),

    /// `count` was called on a value that is not a sequence.
    #[error("not an array")]
    CountOnNonArray,
}

/// Shared accumulator for navigation errors.
///
/// One `Diagnostics` is created per safe-mode root and handed (behind an
/// `Rc`) to every derived node. Interior mutability keeps the accessor API
/// `&self` throughout; `RefCell` makes the type `!Sync`, so sharing a chain
/// across threads is a compile error rather than a race.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: RefCell<Vec<NavError>>,
}

impl Diagnostics {
    /// Append one error to the slot.
    pub fn record(&self, err: NavError) {
        self.errors.borrow_mut().push(err);
    }

    /// True if no error has been recorded since creation or the last
    /// [`reset`](Self::reset).
    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    /// All recorded errors, in the order they occurred.
    pub fn errors(&self) -> Vec<NavError> {
        self.errors.borrow().clone()
    }

    /// The accumulated error text, joined with `"; "`, or `None` when the
    /// slot is empty.
    pub fn message(&self) -> Option<String> {
        let errors = self.errors.borrow();
        if errors.is_empty() {
            return None;
        }
        Some(
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Empty the slot so the chain can be reused.
    pub fn reset(&self) {
        self.errors.borrow_mut().clear();
    }
}
