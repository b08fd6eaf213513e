//! HTTP executor for the document store's action endpoint.

use std::time::Duration;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// Actions the store's endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read documents matching a filter.
    Find,
    /// Insert a single document.
    InsertOne,
    /// Apply a partial update to all documents matching a filter.
    UpdateMany,
    /// Delete all documents matching a filter.
    DeleteMany,
}

impl Action {
    /// The action's path segment on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::InsertOne => "insertOne",
            Self::UpdateMany => "updateMany",
            Self::DeleteMany => "deleteMany",
        }
    }
}

/// Issues single-attempt POST requests against `{endpoint}/action/{action}`.
///
/// Each request carries the connection envelope (`dataSource`, `database`,
/// `collection`) merged with the caller's body, plus the `api-key` header.
/// A bounded timeout applies per request. No retries or backoff: a retried
/// `insertOne` could duplicate a write, so retry policy stays with callers.
pub struct RemoteExecutor {
    config: StoreConfig,
    client: reqwest::Client,
}

impl RemoteExecutor {
    /// Creates an executor for one store configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Executes one action and returns the store's JSON response.
    ///
    /// Non-2xx responses become [`Error::Remote`] with the status and the
    /// response body text; transport failures and timeouts become
    /// [`Error::Network`]. Never an empty success.
    pub async fn execute(
        &self,
        action: Action,
        collection: &str,
        body: Map<String, Value>,
    ) -> Result<Value> {
        let url = format!(
            "{}/action/{}",
            self.config.endpoint.trim_end_matches('/'),
            action.as_str()
        );

        let mut payload = Map::new();
        payload.insert(
            "dataSource".to_string(),
            Value::String(self.config.data_source.clone()),
        );
        payload.insert(
            "database".to_string(),
            Value::String(self.config.database.clone()),
        );
        payload.insert("collection".to_string(), Value::String(collection.to_string()));
        payload.extend(body);

        debug!("POST {url} collection={collection}");

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.config.api_key)
            .json(&Value::Object(payload))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_path_segments() {
        assert_eq!(Action::Find.as_str(), "find");
        assert_eq!(Action::InsertOne.as_str(), "insertOne");
        assert_eq!(Action::UpdateMany.as_str(), "updateMany");
        assert_eq!(Action::DeleteMany.as_str(), "deleteMany");
    }
}
