// update.rs — Bulk workspace entity updates.
//
// `/workspace/update` takes one JSON object with four arrays. Each update item
// belongs in exactly one of them; the request always carries all four keys so
// the server sees a stable schema even when most slots are empty.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::unknown::{self, UnknownItem};

/// Tag used when a vertex update is stored in tagged form.
pub const VERTEX_UPDATE_TYPE: &str = "vertex";

/// Position of a vertex on the workspace graph canvas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphPosition {
    pub x: i64,
    pub y: i64,
}

/// Add, move, or hide a vertex in the workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VertexWorkspaceUpdate {
    pub vertex_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_position: Option<GraphPosition>,

    /// Opaque layout hint passed through to the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_layout_json: Option<String>,

    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl VertexWorkspaceUpdate {
    pub fn new(vertex_id: impl Into<String>) -> Self {
        Self {
            vertex_id: vertex_id.into(),
            graph_position: None,
            graph_layout_json: None,
            visible: true,
        }
    }

    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.graph_position = Some(GraphPosition { x, y });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// One entry of a workspace update request.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceUpdateItem {
    Vertex(VertexWorkspaceUpdate),
    /// An update kind with no request slot in this client.
    Other(UnknownItem),
}

impl WorkspaceUpdateItem {
    pub fn kind(&self) -> &str {
        match self {
            WorkspaceUpdateItem::Vertex(_) => VERTEX_UPDATE_TYPE,
            WorkspaceUpdateItem::Other(item) => &item.kind,
        }
    }
}

impl From<VertexWorkspaceUpdate> for WorkspaceUpdateItem {
    fn from(update: VertexWorkspaceUpdate) -> Self {
        WorkspaceUpdateItem::Vertex(update)
    }
}

impl<'de> Deserialize<'de> for WorkspaceUpdateItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (kind, fields) = unknown::read_tagged(deserializer)?;
        match kind.as_str() {
            VERTEX_UPDATE_TYPE => {
                unknown::decode_fields::<_, D::Error>(fields).map(WorkspaceUpdateItem::Vertex)
            }
            _ => Ok(WorkspaceUpdateItem::Other(UnknownItem { kind, fields })),
        }
    }
}

impl Serialize for WorkspaceUpdateItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WorkspaceUpdateItem::Vertex(update) => {
                unknown::write_tagged(VERTEX_UPDATE_TYPE, update, serializer)
            }
            WorkspaceUpdateItem::Other(item) => item.serialize(serializer),
        }
    }
}

/// Body of `/workspace/update`: four slots, always all present.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceUpdateRequest {
    pub entity_updates: Vec<Value>,
    pub entity_deletes: Vec<Value>,
    pub user_updates: Vec<Value>,
    pub user_deletes: Vec<Value>,
}

impl WorkspaceUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.entity_updates.is_empty()
            && self.entity_deletes.is_empty()
            && self.user_updates.is_empty()
            && self.user_deletes.is_empty()
    }
}
