//! Names of the editable enquiry fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One editable field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryField {
    Name,
    Phone,
    Email,
    City,
    PreferredTime,
    Message,
}

impl InquiryField {
    /// All fields, in form order.
    pub const ALL: [InquiryField; 6] = [
        InquiryField::Name,
        InquiryField::Phone,
        InquiryField::Email,
        InquiryField::City,
        InquiryField::PreferredTime,
        InquiryField::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::City => "city",
            Self::PreferredTime => "preferred_time",
            Self::Message => "message",
        }
    }

    /// Whether the field must be filled before submitting.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Name | Self::Phone | Self::Email | Self::City)
    }
}

impl fmt::Display for InquiryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            "city" => Ok(Self::City),
            "preferred_time" | "pref_time" | "preferredtime" => Ok(Self::PreferredTime),
            "message" => Ok(Self::Message),
            other => Err(format!("Unknown form field: {}", other)),
        }
    }
}
