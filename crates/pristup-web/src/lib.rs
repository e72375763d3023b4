//! HTTP interface for the Pristup intent engine.
//!
//! Exposes the analyzer and the full resolution engine as JSON endpoints so a
//! chat front end can decide, per message, whether to apply an accessibility
//! setting, show the help menu, or forward the text to its conversational
//! agent.

pub mod api;
pub mod server;
pub mod state;

use serde::{Deserialize, Serialize};

pub use server::WebServer;
pub use state::AppState;

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

impl WebConfig {
    /// `host:port` string to bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
