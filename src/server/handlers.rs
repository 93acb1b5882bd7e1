//! MCP tool handlers for the intake server.
//!
//! This module implements the form tools using the rmcp SDK's tool_router pattern.

use crate::domain::{InquiryField, PreferredTime, ValidationError};
use crate::error::FormError;
use crate::models::ContactInquiry;
use crate::services::IntakeService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes the M Legasi contact form.
#[derive(Clone)]
pub struct IntakeMcpServer {
    intake_service: Arc<dyn IntakeService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for IntakeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "contact-intake".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Contact form for the M Legasi residential development. Fill fields with update_field, then submit_form. Success is reported as soon as the enquiry is handed off; delivery is not confirmed.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateFieldParams {
    /// One of: name, phone, email, city, preferred_time, message
    field: String,
    value: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ValidateInquiryParams {
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    preferred_time: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ValidateInquiryParams {
    fn into_inquiry(self) -> Result<ContactInquiry, ValidationError> {
        let preferred_time = match self.preferred_time {
            Some(label) => label.parse::<PreferredTime>()?,
            None => PreferredTime::Anytime,
        };

        Ok(ContactInquiry {
            name: self.name,
            phone: self.phone,
            email: self.email,
            city: self.city,
            preferred_time,
            message: self.message.unwrap_or_default(),
        })
    }
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(message: impl Into<String>) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(message.into()),
        data: None,
    }
}

fn form_error(e: FormError) -> McpError {
    let code = match &e {
        FormError::InvalidInput(_) => ErrorCode::INVALID_PARAMS,
        FormError::SubmitDisabled(_) => ErrorCode::INVALID_REQUEST,
        FormError::Delivery(_) => ErrorCode::INTERNAL_ERROR,
    };
    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl IntakeMcpServer {
    /// Create a new intake MCP server.
    pub fn new(intake_service: Arc<dyn IntakeService>) -> Self {
        Self {
            intake_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Set one field of the contact form.
    #[tool(
        description = "Set one field of the contact form (name, phone, email, city, preferred_time, message). Phone input is reduced to digits. Returns the updated form."
    )]
    async fn update_field(
        &self,
        params: Parameters<UpdateFieldParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let field = params
            .field
            .parse::<InquiryField>()
            .map_err(invalid_params)?;

        tracing::debug!("MCP Handler: update_field {}", field);

        let snapshot = self
            .intake_service
            .update_field(field, &params.value)
            .await
            .map_err(form_error)?;

        json_result(&snapshot)
    }

    /// Show the current state of the contact form.
    #[tool(description = "Show the contact form: field values, inline error, and whether it can be submitted")]
    async fn view_form(&self) -> Result<CallToolResult, McpError> {
        let snapshot = self.intake_service.view().await;
        json_result(&snapshot)
    }

    /// Submit the contact form.
    #[tool(
        description = "Submit the contact form. On a validation problem returns the first error (checked in order name, phone, email, city). On success returns the hand-off receipt; for mail delivery the receipt holds a mailto: link to open."
    )]
    async fn submit_form(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: submit_form called");

        let report = self.intake_service.submit().await.map_err(|e| {
            tracing::error!("Failed to submit form: {:?}", e);
            form_error(e)
        })?;

        json_result(&report)
    }

    /// Reset the form as if the page were reloaded.
    #[tool(description = "Discard the form and start a fresh, empty enquiry (same as reloading the page)")]
    async fn reload_form(&self) -> Result<CallToolResult, McpError> {
        let snapshot = self.intake_service.reload().await;
        json_result(&snapshot)
    }

    /// Validate a complete enquiry without submitting it.
    #[tool(
        description = "Check a complete enquiry without submitting it. Returns either valid with the normalized enquiry, or the first error message."
    )]
    async fn validate_inquiry(
        &self,
        params: Parameters<ValidateInquiryParams>,
    ) -> Result<CallToolResult, McpError> {
        let inquiry = match params.0.into_inquiry() {
            Ok(inquiry) => inquiry,
            Err(e) => {
                return json_result(&serde_json::json!({
                    "valid": false,
                    "field": e.field(),
                    "error": e.to_string(),
                }))
            }
        };

        let response = match self.intake_service.validate(&inquiry) {
            Ok(validated) => serde_json::json!({
                "valid": true,
                "inquiry": validated,
            }),
            Err(e) => serde_json::json!({
                "valid": false,
                "field": e.field(),
                "error": e.to_string(),
            }),
        };

        json_result(&response)
    }

    /// List the preferred contact time options.
    #[tool(description = "List the accepted values for preferred_time")]
    async fn list_preferred_times(&self) -> Result<CallToolResult, McpError> {
        let options = PreferredTime::OPTIONS
            .iter()
            .map(|opt| {
                serde_json::json!({
                    "value": opt.label(),
                    "label": opt.display_name(),
                })
            })
            .collect::<Vec<_>>();

        json_result(&options)
    }
}
