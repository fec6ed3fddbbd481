//! Normalized catalog records produced by extraction
//!
//! These are the values the pipeline hands back to its caller: plain,
//! serializable structs with no ties to the source markup. They are built
//! once per run and owned by the caller afterward; the crate keeps no copy.

use chrono::NaiveDate;
use serde::Serialize;

/// A book catalog record extracted from one book page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    /// Book title
    pub name: String,

    /// Release date on the site
    pub publish_date: NaiveDate,

    /// Synopsis, absent when the page carries none
    pub preamble: Option<String>,

    /// Cover image URL, always absolute
    pub cover_path: String,

    /// Authors in page order; one entry per author link on the page
    pub authors: Vec<AuthorRecord>,

    /// Reader tags, possibly empty
    pub tags: Vec<Tag>,

    /// Genres; the list may be empty even though the genre block is required
    pub genres: Vec<Genre>,

    /// Series name. A book can appear in several series on the page; only
    /// the first one is recorded.
    pub series: Option<String>,

    /// Rating accumulator, not computed here; always 0
    pub rating_sum: u32,

    /// Rating vote count, not computed here; always 0
    pub rating_num: u32,
}

/// An author profile record extracted from one author page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorRecord {
    /// Author display name
    pub name: String,

    /// Biography text, absent when the page has no biography block
    pub bio: Option<String>,

    /// Portrait photo URL, always absolute
    pub photo_path: String,
}

/// A reader tag attached to a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
}

/// A genre a book is listed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Genre {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
