//! Error types for contact intake.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field validation errors live in [`crate::domain::ValidationError`].

use crate::domain::ValidationError;
use thiserror::Error;

/// A delivery strategy could not start.
///
/// Remote failures are never reported here; see [`RelayError`].
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The hand-off could not be started (no runtime to run the send on)
    #[error("Could not start delivery: {0}")]
    Initiate(String),
}

/// Errors raised by a relay transport.
///
/// The relay sends after the visitor has already been told the enquiry went
/// out, so these only reach logs and metrics.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The request did not get an answer
    #[error("Relay transport error: {0}")]
    Transport(String),

    /// The relay endpoint answered with an error status
    #[error("Relay endpoint returned status {status}")]
    Status { status: u16 },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors returned by the contact form.
#[derive(Error, Debug)]
pub enum FormError {
    /// The submit control is disabled (already submitted or sending)
    #[error("Submit is disabled: {0}")]
    SubmitDisabled(&'static str),

    /// A field edit was rejected
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    /// The delivery could not be started
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Convenience type alias for Results with DeliveryError
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Convenience type alias for Results with RelayError
pub type RelayResult<T> = Result<T, RelayError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with FormError
pub type FormResult<T> = Result<T, FormError>;
