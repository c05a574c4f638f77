// client.rs — WorkspaceClient: typed operations over an injected Transport.
//
// Every operation follows the same shape: build the request (session headers,
// optional form or multipart body), hand it to the transport, drain the body,
// decode JSON into a vista-model type. Nothing is retried and nothing is
// cached except the Session.
//
// Operations that change the session take `&mut self`, so sharing one client
// across threads needs the caller's own lock.

use std::io::Read;

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use vista_model::{
    ArtifactImportResult, DiffItem, PublishItem, PublishResult, UserMe, Workspace, WorkspaceDiff,
    WorkspaceUpdateItem, WorkspaceUpdateResult, WorkspaceVertex, WorkspacesResponse,
};

use crate::bootstrap::select_current_workspace;
use crate::error::{ClientError, PartialPublish, Result, TransportError};
use crate::multipart::{self, MultipartField};
use crate::reconcile::{publish_items_from_diffs, update_request_from_items};
use crate::session::Session;
use crate::transport::{Header, Response, Transport, CONTENT_TYPE_HEADER, FORM_CONTENT_TYPE};

pub const USER_ME_PATH: &str = "/user/me";
pub const WORKSPACES_PATH: &str = "/workspaces";
pub const WORKSPACE_NEW_PATH: &str = "/workspace/new";
pub const WORKSPACE_DIFF_PATH: &str = "/workspace/diff";
pub const WORKSPACE_PUBLISH_PATH: &str = "/workspace/publish";
pub const ARTIFACT_IMPORT_PATH: &str = "/artifact/import";
pub const WORKSPACE_VERTICES_PATH: &str = "/workspace/vertices";
pub const WORKSPACE_UPDATE_PATH: &str = "/workspace/update";
pub const LOGOUT_PATH: &str = "/logout";

/// Boundary used for artifact uploads.
pub const ARTIFACT_BOUNDARY: &str = "sdlfkgjmwerijlsslkdfj";

/// Client for one logged-in session against a workspace server.
///
/// Generic over `T: Transport` so tests can plug in
/// [`crate::MemoryTransport`] and applications an HTTP implementation.
pub struct WorkspaceClient<T: Transport> {
    transport: T,
    session: Session,
}

impl<T: Transport> WorkspaceClient<T> {
    /// Create a client with an empty session.
    pub fn new(transport: T) -> Self {
        Self::with_session(transport, Session::new())
    }

    /// Create a client that resumes an existing session.
    pub fn with_session(transport: T, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Split the client back into its transport and session.
    pub fn into_parts(self) -> (T, Session) {
        (self.transport, self.session)
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.session.csrf_token()
    }

    pub fn current_workspace_id(&self) -> Option<&str> {
        self.session.current_workspace_id()
    }

    /// Set the workspace id sent with later requests.
    ///
    /// This is local only: the server's notion of the user's current
    /// workspace is not changed.
    pub fn set_current_workspace_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        tracing::debug!("current workspace set locally to {}", id);
        self.session.set_current_workspace_id(id);
    }

    /// Fetch the logged-in user and adopt its CSRF token and current
    /// workspace id. A body that fails to decode leaves the session as it was.
    pub fn fetch_current_user(&mut self) -> Result<UserMe> {
        let me: UserMe = self.get_json(USER_ME_PATH)?;
        self.session.apply_user_me(&me);
        tracing::info!(
            "session established for {} (current workspace: {})",
            me.user_name.as_deref().unwrap_or("<unknown user>"),
            me.current_workspace_id.as_deref().unwrap_or("<none>")
        );
        Ok(me)
    }

    pub fn workspaces(&self) -> Result<WorkspacesResponse> {
        self.get_json(WORKSPACES_PATH)
    }

    /// Create a workspace. The session is not changed.
    pub fn workspace_new(&self) -> Result<Workspace> {
        let workspace: Workspace = self.post_json(WORKSPACE_NEW_PATH, Vec::new(), None)?;
        tracing::info!("created workspace {}", workspace.id);
        Ok(workspace)
    }

    pub fn workspace_diff(&self) -> Result<WorkspaceDiff> {
        self.get_json(WORKSPACE_DIFF_PATH)
    }

    /// Publish every diff, in order.
    ///
    /// Fails before sending anything if a diff has no publish mapping.
    pub fn publish_all(&self, diffs: &[DiffItem]) -> Result<PublishResult> {
        let items = publish_items_from_diffs(diffs)?;
        self.publish(&items)
    }

    /// Submit pre-built publish commands.
    ///
    /// If the server reports any failure the call returns
    /// [`ClientError::PublishPartialFailure`]; the commands that did not fail
    /// have already been applied on the server.
    pub fn publish(&self, items: &[PublishItem]) -> Result<PublishResult> {
        let publish_data = serde_json::to_string(items)?;
        tracing::debug!("publishing {} item(s)", items.len());

        let result: PublishResult =
            self.post_form(WORKSPACE_PUBLISH_PATH, "publishData", &publish_data)?;

        if result.is_success() {
            return Ok(result);
        }

        tracing::warn!(
            "publish rejected {} of {} item(s)",
            result.failures.len(),
            items.len()
        );
        Err(ClientError::PublishPartialFailure(Box::new(PartialPublish {
            result,
            submitted: items.to_vec(),
        })))
    }

    /// Upload a file as a new artifact.
    ///
    /// The whole file is buffered in memory before the request is sent.
    pub fn artifact_import(
        &self,
        visibility_source: &str,
        file_name: &str,
        file: impl Read,
    ) -> Result<ArtifactImportResult> {
        let body = multipart::encode(
            ARTIFACT_BOUNDARY,
            [
                MultipartField::text("visibilitySource", visibility_source),
                MultipartField::file("file", file_name, file).last(),
            ],
        )
        .map_err(TransportError::from)?;

        tracing::debug!("importing artifact {} ({} byte body)", file_name, body.len());
        let headers = vec![Header::new(
            CONTENT_TYPE_HEADER,
            multipart::content_type(ARTIFACT_BOUNDARY),
        )];
        self.post_json(ARTIFACT_IMPORT_PATH, headers, Some(body))
    }

    pub fn workspace_vertices(&self) -> Result<Vec<WorkspaceVertex>> {
        self.get_json(WORKSPACE_VERTICES_PATH)
    }

    /// Submit entity updates. Fails before sending anything if an item has
    /// no request slot.
    pub fn workspace_update(&self, items: &[WorkspaceUpdateItem]) -> Result<WorkspaceUpdateResult> {
        let request = update_request_from_items(items)?;
        if request.is_empty() {
            tracing::debug!("submitting an empty workspace update");
        }
        let data = serde_json::to_string(&request)?;
        self.post_form(WORKSPACE_UPDATE_PATH, "data", &data)
    }

    /// Establish the current workspace for this session.
    ///
    /// Fetches the user and the workspace list, creates a workspace when the
    /// list is empty, otherwise picks one with [`select_current_workspace`].
    /// The choice is applied locally only.
    pub fn log_in_to_current_workspace(&mut self) -> Result<Workspace> {
        let me = self.fetch_current_user()?;
        let listed = self.workspaces()?.workspaces;

        let current =
            match select_current_workspace(&listed, me.current_workspace_id.as_deref()) {
                Some(workspace) => workspace.clone(),
                None => {
                    tracing::info!("no workspaces available, creating one");
                    self.workspace_new()?
                }
            };

        self.set_current_workspace_id(current.id.clone());
        Ok(current)
    }

    /// End the server session. The response body is drained and ignored.
    pub fn log_out(&self) -> Result<()> {
        let response = self
            .transport
            .post(LOGOUT_PATH, &self.session.headers(), None)?;
        response.into_bytes()?;
        tracing::info!("logged out");
        Ok(())
    }

    fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        tracing::debug!("GET {}", path);
        let response = self.transport.get(path, &self.session.headers())?;
        decode(path, response)
    }

    fn post_json<R: DeserializeOwned>(
        &self,
        path: &str,
        mut headers: Vec<Header>,
        body: Option<Vec<u8>>,
    ) -> Result<R> {
        tracing::debug!("POST {}", path);
        headers.extend(self.session.headers());
        let response = self.transport.post(path, &headers, body)?;
        decode(path, response)
    }

    fn post_form<R: DeserializeOwned>(&self, path: &str, field: &str, value: &str) -> Result<R> {
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair(field, value)
            .finish();
        let headers = vec![Header::new(CONTENT_TYPE_HEADER, FORM_CONTENT_TYPE)];
        self.post_json(path, headers, Some(body.into_bytes()))
    }
}

/// Drain the body and decode it as JSON.
///
/// The status is not checked before decoding: an error page that is not
/// JSON surfaces as [`ClientError::Protocol`] carrying the status.
fn decode<R: DeserializeOwned>(path: &str, response: Response) -> Result<R> {
    let status = response.status;
    if !response.is_success() {
        tracing::warn!("{} returned status {}", path, status);
    }
    let bytes = response.into_bytes()?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Protocol {
        path: path.to_string(),
        status,
        source,
    })
}
