// workspace_flow.rs — End-to-end client flows against a scripted server.
//
// Covers the session bootstrap scenarios and a full edit cycle:
//
//   1. log in → current workspace chosen from server state
//   2. import an artifact read from disk
//   3. place the new vertex on the workspace graph
//   4. fetch the diff and publish it
//
// Every request the client makes is checked against what the server would
// have received.

use std::fs::File;
use std::io::Write;

use tempfile::tempdir;

use vista_client::model::{DiffItem, VertexWorkspaceUpdate, WorkspaceUpdateItem};
use vista_client::transport::{CSRF_TOKEN_HEADER, WORKSPACE_ID_HEADER};
use vista_client::{ClientError, MemoryTransport, Method, WorkspaceClient};

fn client_with(user_me: &str, workspaces: &str) -> WorkspaceClient<MemoryTransport> {
    let transport = MemoryTransport::new();
    transport
        .on_get("/user/me", user_me)
        .on_get("/workspaces", workspaces);
    WorkspaceClient::new(transport)
}

#[test]
fn bootstrap_creates_workspace_when_none_exist() {
    let mut client = client_with(
        r#"{"csrfToken":"tok","currentWorkspaceId":null}"#,
        r#"{"workspaces":[]}"#,
    );
    client
        .transport()
        .on_post("/workspace/new", r#"{"workspaceId":"w-new","title":"Default"}"#);

    let current = client.log_in_to_current_workspace().unwrap();

    assert_eq!(current.id, "w-new");
    assert_eq!(client.current_workspace_id(), Some("w-new"));
    let created = client.transport().requests_to("/workspace/new");
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].header(CSRF_TOKEN_HEADER), Some("tok"));
}

#[test]
fn bootstrap_takes_first_workspace_without_remembered_id() {
    let mut client = client_with(
        r#"{"csrfToken":"tok","currentWorkspaceId":null}"#,
        r#"{"workspaces":[{"workspaceId":"w1"},{"workspaceId":"w2"}]}"#,
    );

    let current = client.log_in_to_current_workspace().unwrap();

    assert_eq!(current.id, "w1");
    assert_eq!(client.current_workspace_id(), Some("w1"));
    assert!(client.transport().requests_to("/workspace/new").is_empty());
}

#[test]
fn bootstrap_keeps_remembered_workspace() {
    let mut client = client_with(
        r#"{"csrfToken":"tok","currentWorkspaceId":"w2"}"#,
        r#"{"workspaces":[{"workspaceId":"w1"},{"workspaceId":"w2"}]}"#,
    );

    let current = client.log_in_to_current_workspace().unwrap();

    assert_eq!(current.id, "w2");
    assert_eq!(client.current_workspace_id(), Some("w2"));
}

#[test]
fn bootstrap_falls_back_when_remembered_workspace_is_gone() {
    let mut client = client_with(
        r#"{"csrfToken":"tok","currentWorkspaceId":"zzz"}"#,
        r#"{"workspaces":[{"workspaceId":"w1"}]}"#,
    );

    let current = client.log_in_to_current_workspace().unwrap();

    assert_eq!(current.id, "w1");
    assert_eq!(client.current_workspace_id(), Some("w1"));
    // Selection is local: exactly the two reads, nothing posted.
    let methods: Vec<Method> = client
        .transport()
        .requests()
        .iter()
        .map(|r| r.method)
        .collect();
    assert_eq!(methods, vec![Method::Get, Method::Get]);
}

#[test]
fn bootstrap_stops_on_undecodable_workspace_list() {
    let mut client = client_with(r#"{"csrfToken":"tok"}"#, r#"{"items":[]}"#);

    let err = client.log_in_to_current_workspace().unwrap_err();

    assert!(matches!(err, ClientError::Protocol { .. }));
    assert_eq!(client.csrf_token(), Some("tok"));
    assert_eq!(client.current_workspace_id(), None);
}

#[test]
fn edit_cycle_from_import_to_publish() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("interview.txt");
    let mut file = File::create(&path).unwrap();
    file.write_all(b"Transcript of interview #4\n").unwrap();
    drop(file);

    let mut client = client_with(
        r#"{"userName":"analyst","csrfToken":"tok-9","currentWorkspaceId":"w1"}"#,
        r#"{"workspaces":[{"workspaceId":"w1","title":"Case 12"}]}"#,
    );
    let server = client.transport();
    server
        .on_post("/artifact/import", r#"{"vertexIds":["v-100"]}"#)
        .on_post("/workspace/update", r#"{"success":true}"#)
        .on_get(
            "/workspace/diff",
            r#"{"diffs":[
                {"type":"VertexDiffItem","vertexId":"v-100","sandboxStatus":"PRIVATE"},
                {"type":"PropertyDiffItem","elementId":"v-100","key":"","name":"title"}
            ]}"#,
        )
        .on_post("/workspace/publish", r#"{"failures":[]}"#);

    client.log_in_to_current_workspace().unwrap();

    // 2. Import.
    let imported = client
        .artifact_import("", "interview.txt", File::open(&path).unwrap())
        .unwrap();
    assert_eq!(imported.vertex_ids, vec!["v-100".to_string()]);

    // 3. Place on the graph.
    let updates: Vec<WorkspaceUpdateItem> =
        vec![VertexWorkspaceUpdate::new("v-100").at(120, 80).into()];
    client.workspace_update(&updates).unwrap();

    // 4. Diff and publish.
    let diff = client.workspace_diff().unwrap();
    assert!(matches!(diff.diffs[0], DiffItem::Vertex(_)));
    let result = client.publish_all(&diff.diffs).unwrap();
    assert!(result.is_success());

    // Every request after login carries both session headers.
    let requests = client.transport().requests();
    assert_eq!(requests.len(), 6);
    for request in &requests[2..] {
        assert_eq!(request.header(CSRF_TOKEN_HEADER), Some("tok-9"));
        assert_eq!(request.header(WORKSPACE_ID_HEADER), Some("w1"));
    }

    let import_body = requests[2].body_text();
    assert!(import_body.contains("Transcript of interview #4\n\r\n"));

    let publish = &requests[5];
    assert_eq!(publish.path, "/workspace/publish");
    let body = publish.body_text();
    let vertex_at = body.find("vertex%22").unwrap();
    let property_at = body.find("property%22").unwrap();
    assert!(vertex_at < property_at, "publish order must follow diff order");
}

#[test]
fn edge_diff_blocks_publish() {
    let client = WorkspaceClient::new(MemoryTransport::new());
    client.transport().on_get(
        "/workspace/diff",
        r#"{"diffs":[
            {"type":"VertexDiffItem","vertexId":"v-1"},
            {"type":"EdgeDiffItem","edgeId":"e-1"}
        ]}"#,
    );

    let diff = client.workspace_diff().unwrap();
    let err = client.publish_all(&diff.diffs).unwrap_err();

    assert_eq!(err.to_string(), "unhandled diff item type: EdgeDiffItem");
    assert!(client.transport().requests_to("/workspace/publish").is_empty());
}

#[test]
fn partial_publish_carries_server_failures() {
    let client = WorkspaceClient::new(MemoryTransport::new());
    client.transport().on_post(
        "/workspace/publish",
        r#"{"failures":[{"type":"property","elementId":"v-1","key":"k","name":"title",
            "action":"publish","errorMessage":"property was modified by another user"}]}"#,
    );

    let diffs = vec![
        DiffItem::vertex("v-1"),
        DiffItem::property("v-1", "k", "title"),
    ];
    match client.publish_all(&diffs) {
        Err(ClientError::PublishPartialFailure(partial)) => {
            assert_eq!(partial.submitted.len(), 2);
            assert_eq!(partial.result.failures.len(), 1);
            assert_eq!(
                partial.result.failures[0].error_message.as_deref(),
                Some("property was modified by another user")
            );
        }
        other => panic!("expected partial failure, got {:?}", other),
    }
}
