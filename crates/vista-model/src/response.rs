// response.rs — Typed views over the JSON bodies the server returns.
//
// Unknown fields are ignored unless a type keeps them in an `extra` map;
// missing required fields make decoding fail, which the client reports as a
// protocol error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::diff::DiffItem;
use crate::workspace::Workspace;

/// Response of `/user/me`: who is logged in and their session values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserMe {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Anti-forgery token for mutating requests.
    #[serde(default)]
    pub csrf_token: Option<String>,

    /// The workspace the server remembers as current for this user.
    #[serde(default)]
    pub current_workspace_id: Option<String>,

    #[serde(default)]
    pub privileges: Vec<String>,
}

/// Response of `/workspaces`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkspacesResponse {
    pub workspaces: Vec<Workspace>,
}

/// Response of `/workspace/diff`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceDiff {
    pub diffs: Vec<DiffItem>,
}

/// Response of `/artifact/import`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactImportResult {
    /// Vertices created for the imported artifact.
    #[serde(default)]
    pub vertex_ids: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element of the `/workspace/vertices` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceVertex {
    pub id: String,

    #[serde(default)]
    pub properties: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `/workspace/update`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceUpdateResult {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl WorkspaceUpdateResult {
    /// The server's `"success"` flag; absent means the server did not say.
    pub fn success(&self) -> Option<bool> {
        self.fields.get("success").and_then(Value::as_bool)
    }
}
