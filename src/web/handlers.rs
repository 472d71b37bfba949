//! Snapshot action handler
//!
//! The whole store API is one POST endpoint distinguished by the
//! `historyAction` form field, the protocol the browser editor speaks:
//! `list` answers a JSON array of names, `load` the raw stored string,
//! `save`/`delete` an empty acknowledgment.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;

use super::error::WebError;
use super::state::AppState;

/// Action discriminant for the single-channel protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotAction {
    List,
    Save,
    Load,
    Delete,
}

/// Form body of a snapshot request.
#[derive(Debug, Deserialize)]
pub struct SnapshotRequest {
    #[serde(rename = "historyAction")]
    pub action: SnapshotAction,
    #[serde(rename = "historyName", default)]
    pub name: Option<String>,
    #[serde(rename = "historyData", default)]
    pub data: Option<String>,
}

/// Dispatch one snapshot request against the file store.
pub async fn handle_snapshot(
    State(state): State<AppState>,
    Form(request): Form<SnapshotRequest>,
) -> Result<Response, WebError> {
    let store = state.store();

    match request.action {
        SnapshotAction::List => {
            let names = store.list()?;
            Ok(Json(names).into_response())
        }
        SnapshotAction::Save => {
            let name = require_name(&request)?;
            let data = request.data.as_deref().unwrap_or_default();
            let stored = store.save(name, data)?;
            if !stored {
                tracing::warn!(name, "Snapshot not stored (not a JSON array)");
            }
            Ok(().into_response())
        }
        SnapshotAction::Load => {
            let name = require_name(&request)?;
            Ok(store.load(name)?.into_response())
        }
        SnapshotAction::Delete => {
            let name = require_name(&request)?;
            store.delete(name)?;
            Ok(().into_response())
        }
    }
}

fn require_name(request: &SnapshotRequest) -> Result<&str, WebError> {
    request
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| WebError::BadRequest("historyName is required".to_string()))
}
