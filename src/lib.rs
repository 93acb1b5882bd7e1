//! Contact intake for the M Legasi residential development site.
//!
//! A visitor fills in a [`ContactInquiry`], it is validated in a fixed order
//! (name, phone, email, city), and the result is handed to one of two delivery
//! strategies chosen at start-up: a fire-and-forget relay to a third-party
//! form endpoint, or a `mailto:` hand-off. Neither can confirm delivery, so
//! both report success optimistically.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (phone, email, preferred time)
//! - **models**: The enquiry entity and its validated form
//! - **delivery**: The relay and mail strategies behind the `Delivery` trait
//! - **form**: The submission state machine
//! - **services**: Session-level orchestration and metrics
//! - **server**: MCP protocol server
//! - **config**: Configuration from environment variables
//! - **error**: Error types

pub mod config;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod form;
pub mod metrics;
pub mod models;
pub mod server;
pub mod services;

pub use config::{Config, FieldMapping};
pub use delivery::{
    Delivery, DeliveryReceipt, DeliveryStrategy, FormRelay, MailHandoff, RelayTransport,
    UreqTransport, SUCCESS_MESSAGE,
};
pub use error::{ConfigError, DeliveryError, FormError, RelayError};
pub use form::{FormSnapshot, FormState, InquiryForm, SubmitOutcome};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{ContactInquiry, ValidatedInquiry};
pub use server::IntakeMcpServer;
pub use services::{IntakeService, IntakeServiceImpl};
