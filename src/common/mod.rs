//! Base types and functions.

pub use std::io::Result as IoRes;
pub use std::path::Path;

pub use crate::errors::*;

#[macro_use]
pub mod macros;
pub mod config;

pub use self::config::*;

/// A revision number and the date of the corresponding commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Revision number, numeric unless overridden from the command line.
    pub rev: String,
    /// Commit date, `YYYY-MM-DD HH:MM:SS` when it comes from svn.
    pub date: String,
}
impl Revision {
    /// Constructor.
    pub fn new<S1: Into<String>, S2: Into<String>>(rev: S1, date: S2) -> Self {
        Revision {
            rev: rev.into(),
            date: date.into(),
        }
    }

    /// Placeholder used when no query succeeds.
    pub fn unknown() -> Self {
        Revision::new("0", "unknown date")
    }

    /// True if the revision number is made of digits only.
    pub fn is_numeric(&self) -> bool {
        !self.rev.is_empty() && self.rev.bytes().all(|b| b.is_ascii_digit())
    }
}
