// error.rs — Error types for the workspace client.

use thiserror::Error;
use vista_model::{PublishItem, PublishResult};

/// Faults below the JSON layer: the request never produced a readable body.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Reading or writing a byte stream failed (response body, upload buffer).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport could not complete the request.
    #[error("request to {path} failed: {message}")]
    Request { path: String, message: String },

    /// The configured server address cannot be used.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// A publish where the server applied some commands and refused others.
#[derive(Debug, Clone)]
pub struct PartialPublish {
    /// The server's answer, including every failure it reported.
    pub result: PublishResult,

    /// Everything that was sent, in submission order.
    pub submitted: Vec<PublishItem>,
}

impl PartialPublish {
    /// Number of submitted commands the server did not report as failed.
    pub fn applied_count(&self) -> usize {
        self.submitted
            .len()
            .saturating_sub(self.result.failures.len())
    }
}

/// Errors surfaced by [`crate::WorkspaceClient`] operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body is not JSON of the expected shape. Non-2xx statuses
    /// end up here too when their body does not decode.
    #[error("unexpected response from {path} (status {status}): {source}")]
    Protocol {
        path: String,
        status: u16,
        source: serde_json::Error,
    },

    /// A request body could not be serialized.
    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// A diff item has no publish mapping. Nothing was submitted.
    #[error("unhandled diff item type: {kind}")]
    UnsupportedDiffType { kind: String },

    /// A workspace update item has no request slot. Nothing was submitted.
    #[error("unhandled workspace update item type: {kind}")]
    UnsupportedUpdateType { kind: String },

    /// The server rejected part of a publish; the rest was applied.
    #[error(
        "publish partially failed: {} of {} items rejected",
        .0.result.failures.len(),
        .0.submitted.len()
    )]
    PublishPartialFailure(Box<PartialPublish>),
}

pub type Result<T> = std::result::Result<T, ClientError>;
