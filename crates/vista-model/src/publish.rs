// publish.rs — Publish commands and the server's verdict on them.
//
// A PublishItem tells the server to commit (or discard) one sandboxed change.
// The server answers with the subset that failed; an empty failure list means
// every command was applied.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What the server should do with the sandboxed change.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PublishAction {
    /// Make the change visible outside the workspace.
    #[default]
    Publish,
    /// Throw the sandboxed change away.
    Delete,
}

/// Wire-level command for a single change.
///
/// Serialized as `{"type": "vertex", "vertexId": ..., "action": "publish"}`
/// or `{"type": "property", "elementId": ..., "key": ..., "name": ..., ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PublishItem {
    #[serde(rename_all = "camelCase")]
    Vertex {
        vertex_id: String,
        #[serde(default)]
        action: PublishAction,
    },

    #[serde(rename_all = "camelCase")]
    Property {
        element_id: String,
        key: String,
        name: String,
        #[serde(default)]
        action: PublishAction,
    },
}

impl PublishItem {
    pub fn vertex(vertex_id: impl Into<String>) -> Self {
        PublishItem::Vertex {
            vertex_id: vertex_id.into(),
            action: PublishAction::Publish,
        }
    }

    pub fn property(
        element_id: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        PublishItem::Property {
            element_id: element_id.into(),
            key: key.into(),
            name: name.into(),
            action: PublishAction::Publish,
        }
    }

    /// Replace the action and return self (builder pattern).
    pub fn with_action(mut self, new_action: PublishAction) -> Self {
        match &mut self {
            PublishItem::Vertex { action, .. } | PublishItem::Property { action, .. } => {
                *action = new_action
            }
        }
        self
    }

    pub fn action(&self) -> PublishAction {
        match self {
            PublishItem::Vertex { action, .. } | PublishItem::Property { action, .. } => *action,
        }
    }
}

/// One publish command the server refused.
///
/// The server echoes the command fields back alongside an error message;
/// they are kept as raw JSON so nothing the server reported is lost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(flatten)]
    pub item: Map<String, Value>,
}

impl PublishFailure {
    /// The echoed `"type"` of the failed command, if any.
    pub fn kind(&self) -> Option<&str> {
        self.item.get("type").and_then(Value::as_str)
    }

    /// The vertex or element id the failed command targeted.
    pub fn target_id(&self) -> Option<&str> {
        self.item
            .get("vertexId")
            .or_else(|| self.item.get("elementId"))
            .and_then(Value::as_str)
    }
}

/// Response of `/workspace/publish`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PublishResult {
    #[serde(default)]
    pub failures: Vec<PublishFailure>,
}

impl PublishResult {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
