//! Error types reported at the query boundary.
//!
//! Unresolved filename dates and unreadable files are deliberately absent
//! here: the scanner represents them as "no date" and "no content".

use thiserror::Error;

/// The company (or variant) name did not name a known archive.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid company selection '{name}'. Available companies: {available}")]
    UnknownCompany { name: String, available: String },
}

/// The identifier supplied by the caller cannot be searched for.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },

    #[error("Tax ID must be exactly 9 digits, got '{0}'")]
    MalformedTaxId(String),

    #[error("Cannot build a search pattern for '{value}': {reason}")]
    Pattern { value: String, reason: String },
}

/// A date-range bound did not parse as `DD-MM-YYYY`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid {which} date '{value}': expected DD-MM-YYYY")]
    InvalidBound { which: &'static str, value: String },
}
