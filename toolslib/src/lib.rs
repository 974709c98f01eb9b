//! # A collection of utilities shared by the forecast crates.
//!
//! The intent of this library is to keep the `log4rs`, `chrono`, and text report
//! plumbing in one place so the library and command line don't each grow their own.
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    result,
};
pub mod date_time;
pub mod logs;
pub mod report;

/// The tools library result.
type Result<T> = result::Result<T, Error>;

/// The tools library Error that can be captured outside the module.
///
/// Currently it contains only a String but can be extended to an enum later on.
#[derive(Debug)]
pub struct Error(String);
/// Include the `ToString` trait for the [`Error`].
impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
/// Create a tools error from a String.
impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::from(error.as_str())
    }
}
/// Create a tools error from a str slice.
impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error(format!("toolslib: {error}"))
    }
}
