//! Errors raised at the tool boundary before a handler runs.

use crate::protocol::JsonRpcError;

/// Caller-side mistakes in a `tools/call` request.
///
/// Upstream failures are never represented here; tools turn those into text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    /// Arguments failed to parse or violated a parameter constraint.
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    pub fn invalid_arguments(tool: &str, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}

impl From<ToolError> for JsonRpcError {
    fn from(error: ToolError) -> Self {
        JsonRpcError::invalid_params(error.to_string())
    }
}
