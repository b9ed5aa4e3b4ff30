use std::borrow::Cow;

use finmcp_core::error::{ErrorKind, ProviderError};
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use serde::{Deserialize, Serialize};

/// Structured error payload handed back to callers as data.
///
/// Envelopes ride inside a successful protocol response with the error flag
/// set, so the agent can reason about the failure instead of seeing a fault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: String,
    pub kind: ErrorKind,
}

impl ErrorEnvelope {
    #[must_use]
    pub fn new(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind,
        }
    }
}

impl From<&ProviderError> for ErrorEnvelope {
    fn from(err: &ProviderError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Shapes an envelope into a tool result with the error flag set.
pub fn envelope_result(envelope: &ErrorEnvelope) -> Result<CallToolResult, ErrorData> {
    Ok(CallToolResult::error(vec![Content::json(envelope)?]))
}

/// Converts an adapter fault into its error-envelope tool result.
pub fn provider_error(err: &ProviderError) -> Result<CallToolResult, ErrorData> {
    envelope_result(&ErrorEnvelope::from(err))
}

/// Shapes a malformed invocation into a `validation_error` envelope.
pub fn validation_error(message: impl Into<String>) -> Result<CallToolResult, ErrorData> {
    envelope_result(&ErrorEnvelope::new(ErrorKind::ValidationError, message))
}

/// Shapes a call to an unregistered tool name into a `validation_error`
/// envelope.
pub fn unknown_tool(name: &str) -> Result<CallToolResult, ErrorData> {
    validation_error(format!("unknown tool: {name}"))
}

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}
