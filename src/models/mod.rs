//! Data models for the contact enquiry form.
//!
//! `ContactInquiry` is the editable entity the visitor types into;
//! `ValidatedInquiry` is the payload handed to a delivery strategy once
//! every rule has passed.

pub mod inquiry;

pub use inquiry::{ContactInquiry, ValidatedInquiry};
