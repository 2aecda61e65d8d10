//! Error types for browser-relay

use thiserror::Error;

/// Errors produced while relaying automation to remote browsers
#[derive(Debug, Error)]
pub enum RelayError {
    /// Failed to establish a remote browser connection
    #[error("Failed to connect to remote browser: {0}")]
    ConnectionFailed(String),

    /// Failed to open a new page on an established connection
    #[error("Failed to open page: {0}")]
    PageOpenFailed(String),

    /// Navigation did not complete
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// An element lookup by CSS selector failed
    #[error("Element '{0}' not found")]
    ElementNotFound(String),

    /// A page operation (click, fill, screenshot, ...) failed
    #[error("Page operation '{op}' failed: {reason}")]
    PageOperationFailed { op: String, reason: String },

    /// JavaScript evaluation in the page context failed
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    /// Script envelope carried a kind tag with no matching workflow
    #[error("Unknown script type: {0}")]
    UnknownScript(String),

    /// Tool-dispatch request named a tool that does not exist
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Request parameters did not deserialize into the expected shape
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The remote automation-agent call failed
    #[error("Agent request failed: {0}")]
    AgentFailed(String),

    /// A workflow failed mid-session; tagged with enough context for the
    /// HTTP error envelope
    #[error("{message}")]
    Automation {
        method: String,
        session_id: String,
        message: String,
        timestamp: String,
    },

    /// A shared map's lock was poisoned by a panicking holder
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    /// A blocking task could not be joined
    #[error("Task failed: {0}")]
    TaskFailed(String),
}

/// Result type alias using RelayError
pub type Result<T> = std::result::Result<T, RelayError>;
