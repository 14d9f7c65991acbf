use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// The minimum length, in characters, of a valid identifier.
pub const MIN_LENGTH: usize = 2;

/// Checks a candidate identifier against the formatting rules.
///
/// An absent identifier is trivially valid (one will be generated). A present
/// one must be at least [`MIN_LENGTH`] characters long and start with an
/// alphabetic character.
///
/// # Examples
///
/// ```
/// use nestrec::domain::identifier::is_valid_format;
///
/// assert!(is_valid_format(None));
/// assert!(is_valid_format(Some("ab")));
/// assert!(!is_valid_format(Some("a")));
/// assert!(!is_valid_format(Some("9lives")));
/// ```
#[must_use]
pub fn is_valid_format(candidate: Option<&str>) -> bool {
    candidate.is_none_or(|s| {
        s.chars().count() >= MIN_LENGTH && s.chars().next().is_some_and(char::is_alphabetic)
    })
}

/// The unique text key of a record.
///
/// Ordering is byte-wise lexicographic, so `"Zed" < "abc"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(NonEmptyString);

impl Identifier {
    /// Creates a new `Identifier` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifierError` if the string is shorter than
    /// [`MIN_LENGTH`] characters or does not start with a letter.
    pub fn new(s: String) -> Result<Self, InvalidIdentifierError> {
        if !is_valid_format(Some(&s)) {
            return Err(InvalidIdentifierError(s));
        }
        NonEmptyString::new(s)
            .map(Self)
            .map_err(InvalidIdentifierError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the first character, uppercased.
    ///
    /// Used to key a group created on demand for this identifier.
    #[must_use]
    pub fn initial(&self) -> char {
        self.as_str()
            .chars()
            .next()
            .map_or('?', |c| c.to_uppercase().next().unwrap_or(c))
    }
}

impl TryFrom<String> for Identifier {
    type Error = InvalidIdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = InvalidIdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for Identifier {
    type Err = InvalidIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not satisfy the identifier rules.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "Invalid identifier '{0}': must be at least 2 characters long and start with a letter"
)]
pub struct InvalidIdentifierError(String);

impl InvalidIdentifierError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}
