//! The chat endpoint client.
//!
//! The endpoint accepts `{message, user_id, role: "user"}` and answers with a
//! JSON object whose `message` field is the reply. Anything else (transport
//! failure, non-2xx status, missing or empty `message`) is a
//! [`TransportError`]; callers substitute one of the fallback constants below.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TransportError;

// ── Fallback wording ─────────────────────────────────────────────────────────

/// Shown in place of the greeting when initialization fails.
pub const INIT_FAILURE_REPLY: &str = "Sorry, I couldn't connect to the assistant right now. Please try again later.";

/// Shown in place of a reply when a user message fails.
pub const REPLY_FAILURE_REPLY: &str = "Sorry, I'm having trouble connecting. Please try again later.";

/// Shown in the birth-registration side panel when a question fails.
pub const FORM_FAILURE_REPLY: &str = "Sorry, I couldn't get an answer right now.";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Header that skips the tunnel provider's browser interstitial page.
pub const INTERSTITIAL_HEADER: &str = "skip_zrok_interstitial";

// ── Types ────────────────────────────────────────────────────────────────────

/// Request body sent to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
    pub role: String,
}

/// The part of the reply envelope the client reads. Other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ChatReply {
    /// The reply text. Non-string payloads are rendered as JSON; falsy ones
    /// (`""`, `null`, `false`, `0`) count as missing.
    pub fn into_text(self) -> Result<String, TransportError> {
        match self.message {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Ok(s),
            Some(serde_json::Value::Number(n)) if n.as_f64() == Some(0.0) => Err(TransportError::MissingMessage),
            Some(serde_json::Value::String(_))
            | Some(serde_json::Value::Null)
            | Some(serde_json::Value::Bool(false))
            | None => Err(TransportError::MissingMessage),
            Some(other) => Ok(other.to_string()),
        }
    }
}

/// Tag the message with its scenario, if any.
pub fn format_outbound(message: &str, scenario_id: Option<&str>) -> String {
    match scenario_id {
        Some(id) => format!("Scenario: {id}\nUser: {message}"),
        None => message.to_string(),
    }
}

// ── Transport ────────────────────────────────────────────────────────────────

/// A synchronous request/response exchange with the chat endpoint.
pub trait ChatTransport: Send + Sync {
    fn send(&self, message: &str, scenario_id: Option<&str>, session_id: &str) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub bypass_interstitial: bool,
}

impl HttpTransportConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            bypass_interstitial: false,
        }
    }
}

/// [`ChatTransport`] over HTTP, backed by a `ureq` agent.
pub struct HttpChatTransport {
    agent: ureq::Agent,
    config: HttpTransportConfig,
}

impl HttpChatTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        if !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://")) {
            return Err(TransportError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                config.endpoint
            )));
        }
        if config.timeout.is_zero() {
            return Err(TransportError::Config("timeout must be non-zero".to_string()));
        }

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();

        Ok(Self { agent, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl ChatTransport for HttpChatTransport {
    fn send(&self, message: &str, scenario_id: Option<&str>, session_id: &str) -> Result<String, TransportError> {
        let body = ChatRequest {
            message: format_outbound(message, scenario_id),
            user_id: session_id.to_string(),
            role: "user".to_string(),
        };
        debug!(
            endpoint = %self.config.endpoint,
            scenario_id = scenario_id.unwrap_or("custom"),
            chars = body.message.len(),
            "sending chat request"
        );

        let mut request = self.agent.post(self.config.endpoint.as_str());
        if self.config.bypass_interstitial {
            request = request.header(INTERSTITIAL_HEADER, "true");
        }

        let mut response = request.send_json(&body).map_err(|e| {
            let err = map_ureq_error(e);
            warn!(endpoint = %self.config.endpoint, error = %err, "chat request failed");
            err
        })?;

        let reply: ChatReply = response.body_mut().read_json().map_err(|e| {
            warn!(error = %e, "chat reply was not valid JSON");
            TransportError::Decode(e.to_string())
        })?;

        let text = reply.into_text().inspect_err(|e| {
            warn!(error = %e, "chat reply rejected");
        })?;
        debug!(chars = text.len(), "chat reply received");
        Ok(text)
    }
}

fn map_ureq_error(e: ureq::Error) -> TransportError {
    match e {
        ureq::Error::StatusCode(status) => TransportError::Status { status },
        ureq::Error::Timeout(_) => TransportError::Timeout,
        other => TransportError::Network(other.to_string()),
    }
}
