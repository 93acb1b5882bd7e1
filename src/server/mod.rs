//! MCP surface of the contact form.
//!
//! A session drives one form: fields are set with `update_field`, the
//! enquiry goes out with `submit_form`, and `reload_form` stands in for a
//! page reload. Closing stdin ends the session, and any relay sends still in
//! flight are abandoned with the runtime.

pub mod handlers;

pub use handlers::IntakeMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Serve `server` on stdin/stdout until the client disconnects.
pub async fn run_server(server: IntakeMcpServer) -> Result<()> {
    let running = server.serve(stdio()).await?;
    let reason = running.waiting().await?;
    tracing::info!(?reason, "MCP session ended");

    Ok(())
}
