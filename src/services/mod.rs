//! Application service layer.
//!
//! Services own the form for the current session and record metrics around
//! it. They sit between the MCP handlers and the form/delivery code.

mod intake_service;

pub use intake_service::{IntakeService, IntakeServiceImpl, SubmitReport};
