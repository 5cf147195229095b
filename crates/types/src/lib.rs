//! Validated primitive types shared by the portal crates.
//!
//! - [`NonEmptyText`]: trimmed text guaranteed to hold at least one non-whitespace character.
//! - [`DocumentDate`]: a calendar date accepted in ISO form and printed the Brazilian way
//!   (`dd/mm/yyyy`).

use chrono::NaiveDate;
use std::str::FromStr;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,

    /// The input could not be read as a calendar date
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction. If nothing
/// is left, construction fails with [`TextError::Empty`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(value: NonEmptyText) -> Self {
        value.0
    }
}

impl FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A calendar date as entered on a form.
///
/// Browsers submit date inputs as `YYYY-MM-DD`; some callers send a full ISO timestamp
/// instead, in which case only the date part is kept. Display uses `dd/mm/yyyy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentDate(NaiveDate);

impl DocumentDate {
    /// Parses an ISO date (`YYYY-MM-DD`), ignoring any `T...` time suffix.
    ///
    /// # Errors
    ///
    /// Returns `TextError::InvalidDate` when the date part is not a valid ISO calendar date.
    pub fn parse(input: &str) -> Result<Self, TextError> {
        let trimmed = input.trim();
        let date_part = trimmed.split('T').next().unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| TextError::InvalidDate(trimmed.to_owned()))
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// ISO form (`YYYY-MM-DD`), as used in file names and prefilled form values.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<NaiveDate> for DocumentDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl FromStr for DocumentDate {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DocumentDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%d/%m/%Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Myrian Fortuna \n").unwrap();
        assert_eq!(text.as_str(), "Myrian Fortuna");
    }

    #[test]
    fn non_empty_text_rejects_blank() {
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(" \t\n"), Err(TextError::Empty));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_blank() {
        let ok: NonEmptyText = serde_json::from_str("\"Creche\"").unwrap();
        assert_eq!(ok.as_str(), "Creche");
        assert!(serde_json::from_str::<NonEmptyText>("\"   \"").is_err());
    }

    #[test]
    fn document_date_displays_day_first() {
        let date = DocumentDate::parse("2024-03-07").unwrap();
        assert_eq!(date.to_string(), "07/03/2024");
        assert_eq!(date.iso(), "2024-03-07");
    }

    #[test]
    fn document_date_ignores_time_suffix() {
        let date = DocumentDate::parse("2024-12-31T08:15:00.000Z").unwrap();
        assert_eq!(date.to_string(), "31/12/2024");
    }

    #[test]
    fn document_date_rejects_non_iso() {
        assert!(matches!(
            DocumentDate::parse("07/03/2024"),
            Err(TextError::InvalidDate(_))
        ));
        assert!(DocumentDate::parse("2024-02-30").is_err());
    }
}
