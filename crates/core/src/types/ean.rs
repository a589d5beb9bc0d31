//! Barcode identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Ean`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum EanError {
    /// The input string is empty.
    #[error("ean cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("ean must be at most {max} digits")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a non-digit character.
    #[error("ean must contain only ASCII digits (found {found:?})")]
    NonDigit {
        /// First offending character.
        found: char,
    },
}

/// A scanned barcode number (EAN-8, EAN-13, UPC-A and friends).
///
/// The EAN is the primary key for products: every cache entry, vote, and
/// catalog lookup is addressed by it. Scanners emit a wider range of symbol
/// lengths than the EAN-13 standard alone, so validation is deliberately
/// loose: any non-empty run of ASCII digits up to 14 characters is accepted.
/// No check-digit verification is performed.
///
/// ## Examples
///
/// ```
/// use shelfscan_core::Ean;
///
/// assert!(Ean::parse("4008400404127").is_ok()); // EAN-13
/// assert!(Ean::parse("96385074").is_ok());      // EAN-8
///
/// assert!(Ean::parse("").is_err());             // empty
/// assert!(Ean::parse("40084004ABC").is_err());  // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Ean(String);

impl Ean {
    /// Maximum length of a barcode number (GTIN-14).
    pub const MAX_LENGTH: usize = 14;

    /// Parse an `Ean` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 14 characters,
    /// or contains a non-digit character.
    pub fn parse(s: &str) -> Result<Self, EanError> {
        if s.is_empty() {
            return Err(EanError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EanError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(found) = s.chars().find(|c| !c.is_ascii_digit()) {
            return Err(EanError::NonDigit { found });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the barcode number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Ean` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Ean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Ean {
    type Err = EanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Ean {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
