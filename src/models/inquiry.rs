//! Contact enquiry entity and its validation.

use crate::domain::{
    sanitize_phone_input, EmailAddress, InquiryField, PhoneNumber, PreferredTime,
    ValidationError,
};
use serde::{Deserialize, Serialize};

/// The fields a visitor fills in to request contact.
///
/// Lives only in memory for the duration of form interaction. It has no
/// identifier, no timestamp and no length limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInquiry {
    /// Full name
    pub name: String,

    /// Phone number, digits only while editing
    pub phone: String,

    /// Email address
    pub email: String,

    /// City the visitor currently stays in
    pub city: String,

    /// Preferred contact time ("" means anytime)
    pub preferred_time: PreferredTime,

    /// Optional free text
    pub message: String,
}

impl ContactInquiry {
    /// Apply one keystroke-level edit.
    ///
    /// The phone value is sanitized to digits on every edit. A preferred
    /// time that is not one of the offered options is rejected and leaves
    /// the entity unchanged.
    pub fn set(&mut self, field: InquiryField, value: &str) -> Result<(), ValidationError> {
        match field {
            InquiryField::Name => self.name = value.to_string(),
            InquiryField::Phone => self.phone = sanitize_phone_input(value),
            InquiryField::Email => self.email = value.to_string(),
            InquiryField::City => self.city = value.to_string(),
            InquiryField::PreferredTime => self.preferred_time = value.parse()?,
            InquiryField::Message => self.message = value.to_string(),
        }
        Ok(())
    }

    /// Current value of a field as the form would display it.
    pub fn get(&self, field: InquiryField) -> &str {
        match field {
            InquiryField::Name => &self.name,
            InquiryField::Phone => &self.phone,
            InquiryField::Email => &self.email,
            InquiryField::City => &self.city,
            InquiryField::PreferredTime => self.preferred_time.label(),
            InquiryField::Message => &self.message,
        }
    }

    /// True when nothing has been entered yet.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Validate the whole entity.
    ///
    /// Required fields are checked in the fixed order name, phone, email,
    /// city, and only the first failure is reported. The check is a pure
    /// function of the current field values.
    ///
    /// # Example
    ///
    /// ```
    /// use contact_intake::models::ContactInquiry;
    ///
    /// let inquiry = ContactInquiry {
    ///     name: "Jane Tan".into(),
    ///     phone: "60123456789".into(),
    ///     email: "jane@example.com".into(),
    ///     city: "Semenyih".into(),
    ///     ..Default::default()
    /// };
    /// assert!(inquiry.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<ValidatedInquiry, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let phone = PhoneNumber::new(self.phone.trim())
            .map_err(|_| ValidationError::InvalidPhone(self.phone.clone()))?;

        // The address is checked untrimmed, as typed.
        let email = EmailAddress::new(self.email.as_str())?;

        let city = self.city.trim();
        if city.is_empty() {
            return Err(ValidationError::MissingCity);
        }

        Ok(ValidatedInquiry {
            name: name.to_string(),
            phone,
            email,
            city: city.to_string(),
            preferred_time: self.preferred_time,
            message: self.message.trim().to_string(),
        })
    }
}

/// An enquiry that passed validation, ready for delivery.
///
/// Text fields are trimmed. Only obtainable through
/// [`ContactInquiry::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedInquiry {
    name: String,
    phone: PhoneNumber,
    email: EmailAddress,
    city: String,
    preferred_time: PreferredTime,
    message: String,
}

impl ValidatedInquiry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn preferred_time(&self) -> PreferredTime {
        self.preferred_time
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Delivery value of a field; empty for unset optional fields.
    pub fn value(&self, field: InquiryField) -> &str {
        match field {
            InquiryField::Name => &self.name,
            InquiryField::Phone => self.phone.as_str(),
            InquiryField::Email => self.email.as_str(),
            InquiryField::City => &self.city,
            InquiryField::PreferredTime => self.preferred_time.label(),
            InquiryField::Message => &self.message,
        }
    }
}
