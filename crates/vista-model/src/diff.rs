// diff.rs — Pending changes reported by `/workspace/diff`.
//
// The server sends a heterogeneous list tagged by "type". Vertex-level and
// property-level diffs are the two kinds this client can publish; anything
// else lands in `DiffItem::Other` and is rejected later, at translation time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::unknown::{self, UnknownItem};

/// Wire tag of a vertex-level diff.
pub const VERTEX_DIFF_TYPE: &str = "VertexDiffItem";

/// Wire tag of a property-level diff.
pub const PROPERTY_DIFF_TYPE: &str = "PropertyDiffItem";

/// Visibility of a sandboxed element relative to the published graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SandboxStatus {
    /// Already published; nothing pending.
    Public,
    /// Published, with unpublished local changes.
    PublicChanged,
    /// Exists only in this workspace.
    Private,
}

/// A vertex created or changed in the workspace sandbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VertexDiffItem {
    pub vertex_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_status: Option<SandboxStatus>,
}

/// A single property changed on a vertex or edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDiffItem {
    /// Id of the vertex or edge carrying the property.
    pub element_id: String,

    /// Property key (distinguishes multi-valued properties).
    #[serde(rename = "key")]
    pub property_key: String,

    /// Property name (e.g. `"http://vista.io#title"`).
    #[serde(rename = "name")]
    pub property_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_status: Option<SandboxStatus>,
}

/// One pending change awaiting publish.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffItem {
    Vertex(VertexDiffItem),
    Property(PropertyDiffItem),
    /// A diff kind this client has no publish mapping for.
    Other(UnknownItem),
}

impl DiffItem {
    pub fn vertex(vertex_id: impl Into<String>) -> Self {
        DiffItem::Vertex(VertexDiffItem {
            vertex_id: vertex_id.into(),
            sandbox_status: None,
        })
    }

    pub fn property(
        element_id: impl Into<String>,
        property_key: impl Into<String>,
        property_name: impl Into<String>,
    ) -> Self {
        DiffItem::Property(PropertyDiffItem {
            element_id: element_id.into(),
            property_key: property_key.into(),
            property_name: property_name.into(),
            sandbox_status: None,
        })
    }

    /// The wire `"type"` tag of this item.
    pub fn kind(&self) -> &str {
        match self {
            DiffItem::Vertex(_) => VERTEX_DIFF_TYPE,
            DiffItem::Property(_) => PROPERTY_DIFF_TYPE,
            DiffItem::Other(item) => &item.kind,
        }
    }
}

impl<'de> Deserialize<'de> for DiffItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (kind, fields) = unknown::read_tagged(deserializer)?;
        match kind.as_str() {
            VERTEX_DIFF_TYPE => unknown::decode_fields::<_, D::Error>(fields).map(DiffItem::Vertex),
            PROPERTY_DIFF_TYPE => {
                unknown::decode_fields::<_, D::Error>(fields).map(DiffItem::Property)
            }
            _ => Ok(DiffItem::Other(UnknownItem { kind, fields })),
        }
    }
}

impl Serialize for DiffItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DiffItem::Vertex(item) => unknown::write_tagged(VERTEX_DIFF_TYPE, item, serializer),
            DiffItem::Property(item) => unknown::write_tagged(PROPERTY_DIFF_TYPE, item, serializer),
            DiffItem::Other(item) => item.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_vertex_diff() {
        let item: DiffItem = serde_json::from_value(json!({
            "type": "VertexDiffItem",
            "vertexId": "v-1",
            "sandboxStatus": "PRIVATE"
        }))
        .unwrap();
        assert_eq!(
            item,
            DiffItem::Vertex(VertexDiffItem {
                vertex_id: "v-1".to_string(),
                sandbox_status: Some(SandboxStatus::Private),
            })
        );
    }

    #[test]
    fn decodes_property_diff_with_key_and_name() {
        let item: DiffItem = serde_json::from_value(json!({
            "type": "PropertyDiffItem",
            "elementId": "v-2",
            "key": "k1",
            "name": "title",
            "sandboxStatus": "PUBLIC_CHANGED"
        }))
        .unwrap();
        match item {
            DiffItem::Property(p) => {
                assert_eq!(p.element_id, "v-2");
                assert_eq!(p.property_key, "k1");
                assert_eq!(p.property_name, "title");
                assert_eq!(p.sandbox_status, Some(SandboxStatus::PublicChanged));
            }
            other => panic!("expected property diff, got {:?}", other),
        }
    }

    #[test]
    fn unknown_type_keeps_tag_and_fields() {
        let item: DiffItem = serde_json::from_value(json!({
            "type": "EdgeDiffItem",
            "edgeId": "e-9"
        }))
        .unwrap();
        assert_eq!(item.kind(), "EdgeDiffItem");
        match item {
            DiffItem::Other(unknown) => assert_eq!(unknown.fields["edgeId"], "e-9"),
            other => panic!("expected Other, got {:?}", other),
        }
    }

    #[test]
    fn known_type_with_missing_field_is_an_error() {
        let result: Result<DiffItem, _> =
            serde_json::from_value(json!({ "type": "VertexDiffItem" }));
        assert!(result.is_err());
    }

    #[test]
    fn missing_type_tag_is_an_error() {
        let result: Result<DiffItem, _> = serde_json::from_value(json!({ "vertexId": "v-1" }));
        assert!(result.is_err());
    }

    #[test]
    fn serialization_restores_type_tag() {
        let json = serde_json::to_value(DiffItem::vertex("v-3")).unwrap();
        assert_eq!(json, json!({ "type": "VertexDiffItem", "vertexId": "v-3" }));
    }
}
