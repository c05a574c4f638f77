// reconcile.rs — Translate locally observed records into request bodies.
//
// Two translations live here:
//
//   diff items    → publish items      (1:1, order preserved)
//   update items  → four-slot request  (routed by variant)
//
// Both are all-or-nothing: the first record with no mapping aborts the whole
// translation, so a request is never built from a partial set.

use vista_model::{DiffItem, PublishItem, WorkspaceUpdateItem, WorkspaceUpdateRequest};

use crate::error::{ClientError, Result};

/// Map each diff to the publish command that commits it.
///
/// The output has the same length and order as `diffs`. A diff kind with no
/// mapping fails with [`ClientError::UnsupportedDiffType`].
pub fn publish_items_from_diffs(diffs: &[DiffItem]) -> Result<Vec<PublishItem>> {
    diffs.iter().map(publish_item_from_diff).collect()
}

fn publish_item_from_diff(diff: &DiffItem) -> Result<PublishItem> {
    match diff {
        DiffItem::Vertex(vertex) => Ok(PublishItem::vertex(vertex.vertex_id.clone())),
        DiffItem::Property(property) => Ok(PublishItem::property(
            property.element_id.clone(),
            property.property_key.clone(),
            property.property_name.clone(),
        )),
        DiffItem::Other(unknown) => Err(ClientError::UnsupportedDiffType {
            kind: unknown.kind.clone(),
        }),
    }
}

/// Bucket update items into the request slots.
///
/// Vertex updates go to `entityUpdates`. Any other kind fails with
/// [`ClientError::UnsupportedUpdateType`].
pub fn update_request_from_items(
    items: &[WorkspaceUpdateItem],
) -> Result<WorkspaceUpdateRequest> {
    let mut request = WorkspaceUpdateRequest::default();
    for item in items {
        match item {
            WorkspaceUpdateItem::Vertex(update) => {
                request.entity_updates.push(serde_json::to_value(update)?);
            }
            WorkspaceUpdateItem::Other(unknown) => {
                return Err(ClientError::UnsupportedUpdateType {
                    kind: unknown.kind.clone(),
                });
            }
        }
    }
    Ok(request)
}
