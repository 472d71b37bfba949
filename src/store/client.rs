//! Client for the snapshot server
//!
//! All four operations go over a single POST channel distinguished by
//! the `historyAction` form field, matching the wire protocol the
//! browser editor spoke. Unlike the fire-and-forget original, every
//! call surfaces transport failures and non-2xx statuses as errors so
//! callers can keep their prior state and notify the user.

use serde::Serialize;

/// Error type for remote store operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteStoreError {
    /// Transport failure or non-success status.
    #[error("remote store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The `list` response was not a JSON array of names.
    #[error("malformed list response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ActionForm<'a> {
    #[serde(rename = "historyAction")]
    action: &'a str,
    #[serde(rename = "historyName", skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(rename = "historyData", skip_serializing_if = "Option::is_none")]
    data: Option<&'a str>,
}

/// Thin request/response wrapper over the snapshot server.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    url: String,
}

impl RemoteStore {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    async fn send(&self, form: &ActionForm<'_>) -> Result<String, RemoteStoreError> {
        let response = self
            .client
            .post(&self.url)
            .form(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Names of all snapshots on the server.
    pub async fn list(&self) -> Result<Vec<String>, RemoteStoreError> {
        let body = self
            .send(&ActionForm {
                action: "list",
                name: None,
                data: None,
            })
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Persist structured-form `data` under `name`.
    pub async fn save(&self, name: &str, data: &str) -> Result<(), RemoteStoreError> {
        self.send(&ActionForm {
            action: "save",
            name: Some(name),
            data: Some(data),
        })
        .await?;
        Ok(())
    }

    /// Raw stored content, empty if the snapshot is absent.
    pub async fn load(&self, name: &str) -> Result<String, RemoteStoreError> {
        self.send(&ActionForm {
            action: "load",
            name: Some(name),
            data: None,
        })
        .await
    }

    /// Remove the named snapshot.
    pub async fn delete(&self, name: &str) -> Result<(), RemoteStoreError> {
        self.send(&ActionForm {
            action: "delete",
            name: Some(name),
            data: None,
        })
        .await?;
        Ok(())
    }
}
