//! Domain validation errors.

use super::field::InquiryField;
use std::fmt;

/// Errors that can occur while validating an enquiry.
///
/// The `Display` output is the inline message shown to the visitor, so it
/// never echoes the rejected value back. The raw value is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The name is empty after trimming.
    MissingName,

    /// The phone number is missing or not 7 to 15 digits.
    InvalidPhone(String),

    /// The email address is missing or malformed.
    InvalidEmail(String),

    /// The city is empty after trimming.
    MissingCity,

    /// The preferred contact time is not one of the offered options.
    UnknownPreferredTime(String),
}

impl ValidationError {
    /// The form field this error points at.
    pub fn field(&self) -> InquiryField {
        match self {
            Self::MissingName => InquiryField::Name,
            Self::InvalidPhone(_) => InquiryField::Phone,
            Self::InvalidEmail(_) => InquiryField::Email,
            Self::MissingCity => InquiryField::City,
            Self::UnknownPreferredTime(_) => InquiryField::PreferredTime,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Please enter your full name."),
            Self::InvalidPhone(_) => {
                write!(f, "Please enter a valid phone number (digits only).")
            }
            Self::InvalidEmail(_) => write!(f, "Please enter a valid email address."),
            Self::MissingCity => {
                write!(f, "Please enter the city you are currently staying in.")
            }
            Self::UnknownPreferredTime(_) => {
                write!(f, "Please choose one of the offered contact times.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
