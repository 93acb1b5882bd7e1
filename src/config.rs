//! Configuration management for contact intake.
//!
//! This module handles loading and validating configuration from environment variables.
//! Everything is resolved once at process start: the delivery strategy, the relay
//! endpoint and its field mapping, and the mail recipient. Nothing here changes at runtime.

use crate::delivery::DeliveryStrategy;
use crate::domain::{EmailAddress, InquiryField};
use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Google Forms endpoint the enquiry form posts to.
pub const DEFAULT_FORM_ACTION: &str = "https://docs.google.com/forms/d/e/1FAIpQLSfz2Kdgh8Q_v3WuP05jybnojAeIk1AZxwolWprfKop94SwoLA/formResponse";

/// Sales inbox used by the mail handoff.
pub const DEFAULT_MAIL_RECIPIENT: &str = "sales@mlegasi.com.my";

/// Subject template for the mail handoff; `{name}` is replaced with the visitor's name.
pub const DEFAULT_MAIL_SUBJECT: &str = "Enquiry from {name}";

/// External field identifiers registered with the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub preferred_time: String,
    pub message: String,
}

impl FieldMapping {
    /// External id for a form field.
    pub fn id_for(&self, field: InquiryField) -> &str {
        match field {
            InquiryField::Name => &self.name,
            InquiryField::Phone => &self.phone,
            InquiryField::Email => &self.email,
            InquiryField::City => &self.city,
            InquiryField::PreferredTime => &self.preferred_time,
            InquiryField::Message => &self.message,
        }
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        FieldMapping {
            name: "entry.1623702764".to_string(),
            phone: "entry.307574555".to_string(),
            email: "entry.226559707".to_string(),
            city: "entry.706402315".to_string(),
            preferred_time: "entry.37580560".to_string(),
            message: "entry.1272408800".to_string(),
        }
    }
}

/// Configuration for contact intake.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which delivery strategy this deployment uses (default: relay)
    pub delivery_strategy: DeliveryStrategy,

    /// Relay endpoint receiving the form POST
    pub relay_form_action: String,

    /// Relay field identifiers
    pub relay_fields: FieldMapping,

    /// Seconds before relay channels are torn down (default: 3)
    pub relay_cleanup_grace_secs: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Recipient of the mail handoff
    pub mail_recipient: String,

    /// Subject template of the mail handoff
    pub mail_subject: String,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `INTAKE_DELIVERY_STRATEGY`: `relay` or `mail` (default: relay)
    /// - `RELAY_FORM_ACTION`: relay endpoint URL
    /// - `RELAY_FIELD_NAME`, `RELAY_FIELD_PHONE`, `RELAY_FIELD_EMAIL`, `RELAY_FIELD_CITY`,
    ///   `RELAY_FIELD_PREFERRED_TIME`, `RELAY_FIELD_MESSAGE`: relay field ids
    /// - `RELAY_CLEANUP_GRACE_SECS`: relay cleanup delay (default: 3)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MAIL_RECIPIENT`: mail handoff address
    /// - `MAIL_SUBJECT`: mail subject template
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        // We use dotenvy::dotenv() which doesn't print to stdout
        let _ = dotenvy::dotenv();

        let delivery_strategy = match env::var("INTAKE_DELIVERY_STRATEGY") {
            Ok(val) => val
                .parse::<DeliveryStrategy>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "INTAKE_DELIVERY_STRATEGY".to_string(),
                    reason,
                })?,
            Err(_) => DeliveryStrategy::Relay,
        };

        let relay_form_action =
            env::var("RELAY_FORM_ACTION").unwrap_or_else(|_| DEFAULT_FORM_ACTION.to_string());

        // Validate relay URL format
        if !relay_form_action.starts_with("http://") && !relay_form_action.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                var: "RELAY_FORM_ACTION".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let defaults = FieldMapping::default();
        let relay_fields = FieldMapping {
            name: Self::parse_field_id("RELAY_FIELD_NAME", defaults.name)?,
            phone: Self::parse_field_id("RELAY_FIELD_PHONE", defaults.phone)?,
            email: Self::parse_field_id("RELAY_FIELD_EMAIL", defaults.email)?,
            city: Self::parse_field_id("RELAY_FIELD_CITY", defaults.city)?,
            preferred_time: Self::parse_field_id(
                "RELAY_FIELD_PREFERRED_TIME",
                defaults.preferred_time,
            )?,
            message: Self::parse_field_id("RELAY_FIELD_MESSAGE", defaults.message)?,
        };

        let relay_cleanup_grace_secs = Self::parse_env_u64("RELAY_CLEANUP_GRACE_SECS", 3)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        let mail_recipient =
            env::var("MAIL_RECIPIENT").unwrap_or_else(|_| DEFAULT_MAIL_RECIPIENT.to_string());
        if !EmailAddress::is_valid(&mail_recipient) {
            return Err(ConfigError::InvalidValue {
                var: "MAIL_RECIPIENT".to_string(),
                reason: format!("Must be an email address, got: {}", mail_recipient),
            });
        }

        let mail_subject =
            env::var("MAIL_SUBJECT").unwrap_or_else(|_| DEFAULT_MAIL_SUBJECT.to_string());
        if mail_subject.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "MAIL_SUBJECT".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            delivery_strategy,
            relay_form_action,
            relay_fields,
            relay_cleanup_grace_secs,
            request_timeout,
            mail_recipient,
            mail_subject,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Read a relay field id, rejecting blank overrides.
    fn parse_field_id(var_name: &str, default: String) -> ConfigResult<String> {
        match env::var(var_name) {
            Ok(val) if val.trim().is_empty() => Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            }),
            Ok(val) => Ok(val.trim().to_string()),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            delivery_strategy: DeliveryStrategy::Relay,
            relay_form_action: DEFAULT_FORM_ACTION.to_string(),
            relay_fields: FieldMapping::default(),
            relay_cleanup_grace_secs: 3,
            request_timeout: 10,
            mail_recipient: DEFAULT_MAIL_RECIPIENT.to_string(),
            mail_subject: DEFAULT_MAIL_SUBJECT.to_string(),
            log_level: "error".to_string(),
        }
    }
}
