// workspace.rs — The Workspace record.

use serde::{Deserialize, Serialize};

/// A collaborative workspace as listed by `/workspaces`.
///
/// Identity is the id alone: two records with the same id compare equal even
/// if the server changed the title between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(rename = "workspaceId", alias = "id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default)]
    pub is_shared_to_user: bool,

    /// Missing means editable.
    #[serde(default = "default_editable")]
    pub is_editable: bool,
}

fn default_editable() -> bool {
    true
}

impl Workspace {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            created_by: None,
            is_shared_to_user: false,
            is_editable: default_editable(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl PartialEq for Workspace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Workspace {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equality_is_by_id_only() {
        let a = Workspace::new("w1").with_title("Before");
        let b = Workspace::new("w1").with_title("After");
        assert_eq!(a, b);
        assert_ne!(a, Workspace::new("w2"));
    }

    #[test]
    fn accepts_workspace_id_or_id() {
        let a: Workspace =
            serde_json::from_value(json!({ "workspaceId": "w1", "title": "Case 7" })).unwrap();
        let b: Workspace = serde_json::from_value(json!({ "id": "w1" })).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.title.as_deref(), Some("Case 7"));
    }

    #[test]
    fn decoded_and_constructed_defaults_agree() {
        let decoded: Workspace = serde_json::from_value(json!({ "workspaceId": "w1" })).unwrap();
        let built = Workspace::new("w1");
        assert_eq!(decoded.is_editable, built.is_editable);
        assert!(decoded.is_editable);
        assert_eq!(decoded.is_shared_to_user, built.is_shared_to_user);

        let read_only: Workspace =
            serde_json::from_value(json!({ "workspaceId": "w2", "isEditable": false })).unwrap();
        assert!(!read_only.is_editable);
    }
}
