//! Parsing layer: documents in, records out
//!
//! This module turns fetched HTML into [`crate::record`] values:
//! - [`date`] translates the site's localized release-date strings
//! - [`select`] is the typed query layer every extractor goes through
//! - [`author`] parses one author profile page
//! - [`book`] parses one book page and resolves its authors with a nested
//!   fetch batch
//!
//! Site markup is unstable, so every required anchor fails loudly with
//! [`ExtractError::MissingField`] naming the field, at exactly one call site.

pub mod date;

mod author;
mod book;
mod select;

pub use author::extract_author;
pub use book::{extract_book, parse_book_page, BookPage};
pub use date::{translate, MalformedDateError};

use crate::fetch::FetchError;
use crate::SiteError;
use thiserror::Error;

/// Errors produced while extracting records from documents
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A required structural anchor is absent from the document
    #[error("Required element missing: {0}")]
    MissingField(&'static str),

    /// The release-date string did not match the expected format
    #[error(transparent)]
    MalformedDate(#[from] MalformedDateError),

    /// A nested author fetch failed; fails the enclosing book
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// An address in the document could not be resolved
    #[error(transparent)]
    Site(#[from] SiteError),
}
