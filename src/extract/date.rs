//! Release-date translation
//!
//! The site prints release dates as `"15 марта 2020"`: day, month name in
//! the Russian genitive case, year. [`translate`] turns that into a
//! [`NaiveDate`] using a fixed twelve-entry month table; there is no
//! timezone or locale negotiation beyond it.

use chrono::NaiveDate;
use thiserror::Error;

/// Genitive month names as they appear on the site, January first
const MONTH_NAMES: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// A release-date string that does not match the expected format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedDateError {
    #[error("Expected `day month year`, got {0:?}")]
    TokenCount(String),

    #[error("Day or year is not a number in {0:?}")]
    NotANumber(String),

    #[error("Unknown month name {0:?}")]
    UnknownMonth(String),

    #[error("No such calendar date: {0:?}")]
    NoSuchDate(String),
}

/// Maps a genitive month name to its 1-based month number
fn month_number(token: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|name| *name == token)
        .map(|index| index as u32 + 1)
}

/// Translates a localized `day month-name year` string into a calendar date
///
/// # Arguments
///
/// * `text` - The date string, e.g. `"15 марта 2020"`
///
/// # Returns
///
/// * `Ok(NaiveDate)` - The calendar date
/// * `Err(MalformedDateError)` - Wrong token count, non-numeric day/year,
///   unknown month name, or a day/year combination naming no real date
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use litres_harvest::extract::translate;
///
/// let date = translate("15 марта 2020").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2020, 3, 15).unwrap());
/// ```
pub fn translate(text: &str) -> Result<NaiveDate, MalformedDateError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let &[day, month, year] = tokens.as_slice() else {
        return Err(MalformedDateError::TokenCount(text.to_string()));
    };

    let day: u32 = day
        .parse()
        .map_err(|_| MalformedDateError::NotANumber(text.to_string()))?;

    let month =
        month_number(month).ok_or_else(|| MalformedDateError::UnknownMonth(month.to_string()))?;

    let year: i32 = year
        .parse()
        .map_err(|_| MalformedDateError::NotANumber(text.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| MalformedDateError::NoSuchDate(text.to_string()))
}
