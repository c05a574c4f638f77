//! # vista-client
//!
//! Session-aware client for the Vista workspace API.
//!
//! The client shapes requests and interprets responses; the bytes on the wire
//! are moved by an injected [`Transport`]. The interesting parts are not the
//! HTTP calls but the protocol around them:
//!
//! - **Reconciliation** — diffs reported by the server are translated 1:1, in
//!   order, into publish commands ([`reconcile`]). A publish where the server
//!   applied only some commands is reported as
//!   [`ClientError::PublishPartialFailure`] with the full result attached.
//! - **Bootstrap** — [`WorkspaceClient::log_in_to_current_workspace`] picks the
//!   current workspace deterministically from server state ([`bootstrap`]).
//! - **Session** — the CSRF token and current workspace id live in a
//!   [`Session`] owned by the client and are sent as headers on every request.
//!
//! ## Example
//!
//! ```
//! use vista_client::{MemoryTransport, WorkspaceClient};
//!
//! let transport = MemoryTransport::new();
//! transport
//!     .on_get("/user/me", r#"{"csrfToken":"t","currentWorkspaceId":null}"#)
//!     .on_get("/workspaces", r#"{"workspaces":[{"workspaceId":"w1"}]}"#);
//!
//! let mut client = WorkspaceClient::new(transport);
//! let current = client.log_in_to_current_workspace().unwrap();
//! assert_eq!(current.id, "w1");
//! assert_eq!(client.current_workspace_id(), Some("w1"));
//! ```

pub mod bootstrap;
pub mod client;
pub mod error;
pub mod memory;
pub mod multipart;
pub mod reconcile;
pub mod session;
pub mod transport;

pub use bootstrap::select_current_workspace;
pub use client::WorkspaceClient;
pub use error::{ClientError, PartialPublish, Result, TransportError};
pub use memory::{MemoryTransport, Method, RecordedRequest};
pub use multipart::MultipartField;
pub use reconcile::{publish_items_from_diffs, update_request_from_items};
pub use session::Session;
pub use transport::{Header, Response, Transport};

pub use vista_model as model;
