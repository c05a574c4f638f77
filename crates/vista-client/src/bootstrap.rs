// bootstrap.rs — Choosing the current workspace after login.
//
// Policy, in order:
//   1. no workspaces at all      → caller must create one
//   2. no remembered workspace   → first workspace in server order
//   3. remembered id is listed   → that workspace
//   4. remembered id is stale    → first workspace in server order
//
// Server order is authoritative for the "first" fallback.

use vista_model::Workspace;

/// Pick the workspace that should become current.
///
/// Returns `None` only when `workspaces` is empty.
pub fn select_current_workspace<'a>(
    workspaces: &'a [Workspace],
    remembered_id: Option<&str>,
) -> Option<&'a Workspace> {
    let first = workspaces.first()?;
    let Some(id) = remembered_id else {
        return Some(first);
    };
    Some(workspaces.iter().find(|w| w.id == id).unwrap_or(first))
}
