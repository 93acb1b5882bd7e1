//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the fields of a contact
//! enquiry: phone numbers, email addresses and the preferred contact time.
//! These value objects validate at construction time so that a
//! [`ValidatedInquiry`](crate::models::ValidatedInquiry) can only be built
//! from data that passed the form rules.

pub mod email;
pub mod errors;
pub mod field;
pub mod phone;
pub mod preferred_time;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use field::InquiryField;
pub use phone::{sanitize_phone_input, PhoneNumber};
pub use preferred_time::PreferredTime;
