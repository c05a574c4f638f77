//! # vista-model
//!
//! Wire data model for the Vista workspace API.
//!
//! Everything the server sends or receives is described here as plain serde
//! types. Polymorphic records (diff items, workspace update items) are Rust
//! enums; records whose `"type"` tag this client does not know decode into an
//! `Other` variant that keeps the tag, so callers can report exactly what was
//! skipped instead of guessing.
//!
//! ## Key types
//!
//! - [`DiffItem`] — a pending change reported by `/workspace/diff`.
//! - [`PublishItem`] — the command that commits (or discards) one change.
//! - [`WorkspaceUpdateItem`] — a bulk entity update bucketed into
//!   [`WorkspaceUpdateRequest`] slots.
//! - [`Workspace`] and the response payloads in [`response`].

pub mod diff;
pub mod publish;
pub mod response;
pub mod unknown;
pub mod update;
pub mod workspace;

pub use diff::{DiffItem, PropertyDiffItem, SandboxStatus, VertexDiffItem};
pub use publish::{PublishAction, PublishFailure, PublishItem, PublishResult};
pub use response::{
    ArtifactImportResult, UserMe, WorkspaceDiff, WorkspaceUpdateResult, WorkspaceVertex,
    WorkspacesResponse,
};
pub use unknown::UnknownItem;
pub use update::{GraphPosition, VertexWorkspaceUpdate, WorkspaceUpdateItem, WorkspaceUpdateRequest};
pub use workspace::Workspace;
