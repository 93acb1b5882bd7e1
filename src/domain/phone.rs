//! PhoneNumber value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ASCII digits only; `\d` in `regex` would also admit other Unicode digits.
static PHONE_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{7,15}$").expect("phone pattern is valid"));

/// Strip every non-digit character from raw phone input.
///
/// Applied on every keystroke, so the phone field never holds anything but
/// digits while the visitor is typing.
///
/// ```
/// use contact_intake::domain::sanitize_phone_input;
///
/// assert_eq!(sanitize_phone_input("+60 12-345 6789"), "60123456789");
/// ```
pub fn sanitize_phone_input(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// A type-safe wrapper for enquiry phone numbers.
///
/// Whitespace is removed before checking, and what remains must be 7 to 15
/// decimal digits. Letters, `+`, dashes and other symbols are rejected.
///
/// # Example
///
/// ```
/// use contact_intake::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("6012 345 6789").unwrap();
/// assert_eq!(phone.as_str(), "60123456789");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if, after whitespace removal,
    /// the value is not 7 to 15 digits.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();
        let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

        if !Self::is_valid(&compact) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(compact))
    }

    /// Validate an already whitespace-free candidate.
    pub fn is_valid(compact: &str) -> bool {
        PHONE_DIGITS.is_match(compact)
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
