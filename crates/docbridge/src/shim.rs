//! The compatibility shim: a prepared-statement surface over store actions.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::executor::{Action, RemoteExecutor};
use crate::sql::{
    apply_sort_and_limit, build_document, build_filter, build_update, classify, Operation, Params,
    Statement,
};

/// Outcome of a write statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    /// Documents inserted, modified, or deleted.
    pub changes: u64,
    /// Store-assigned id of an inserted document, when the write was an
    /// INSERT and the store reported one.
    pub inserted_id: Option<String>,
}

#[derive(Deserialize)]
struct FindResponse {
    #[serde(default)]
    documents: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertOneResponse {
    inserted_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateManyResponse {
    #[serde(default)]
    modified_count: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteManyResponse {
    #[serde(default)]
    deleted_count: u64,
}

/// A document store exposing the prepared-statement calling convention of an
/// embedded relational engine.
///
/// Every execution method is explicitly `async`: each call is one HTTP
/// round-trip to the store. Call sites written against a synchronous engine
/// must `await` results; there is no blocking facade. Cloning is cheap and
/// all clones share one HTTP client and configuration, read-only after
/// construction.
#[derive(Clone)]
pub struct DocumentStore {
    executor: Arc<RemoteExecutor>,
}

impl DocumentStore {
    /// Opens a store handle with the given configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        Ok(Self {
            executor: Arc::new(RemoteExecutor::new(config)?),
        })
    }

    /// Prepares a statement. Classification happens here; execution of an
    /// unclassifiable statement fails with [`Error::Parse`] before any
    /// network traffic.
    #[must_use]
    pub fn prepare(&self, sql: &str) -> PreparedStatement {
        PreparedStatement {
            store: self.clone(),
            statement: classify(sql),
        }
    }

    /// DDL entry point kept for interface compatibility. Document stores
    /// have no schema to create, so this does nothing.
    pub fn exec(&self, sql: &str) {
        debug!("ignoring DDL statement: {}", sql.trim());
    }

    /// Engine-setting entry point kept for interface compatibility. No-op.
    pub fn pragma(&self, setting: &str) {
        debug!("ignoring pragma: {}", setting.trim());
    }

    /// Shape-compatible stand-in for a transaction wrapper.
    ///
    /// Returns the callback unchanged: invoking it runs the steps
    /// immediately and **without atomicity**. If a later step fails, effects
    /// of earlier steps stay persisted — there is no rollback. Callers that
    /// need all-or-nothing semantics cannot get them from this shim.
    pub fn transaction<F>(&self, callback: F) -> F {
        callback
    }
}

/// A classified statement bound to a store, ready to execute.
pub struct PreparedStatement {
    store: DocumentStore,
    statement: Statement,
}

impl PreparedStatement {
    /// The classified operation kind.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.statement.operation
    }

    /// The classified target collection.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.statement.collection
    }

    fn ensure_executable(&self) -> Result<()> {
        if self.statement.operation == Operation::Other {
            return Err(Error::Parse(format!(
                "cannot execute unclassified statement '{}'",
                self.statement.raw
            )));
        }
        if self.statement.collection == "unknown" {
            return Err(Error::Parse(format!(
                "no collection found in '{}'",
                self.statement.raw
            )));
        }
        Ok(())
    }

    /// Executes a SELECT and returns all matching documents, with ORDER BY
    /// and LIMIT applied client-side.
    pub async fn all(&self, params: &Params) -> Result<Vec<Value>> {
        self.ensure_executable()?;
        if self.statement.operation != Operation::Select {
            return Err(Error::Parse(format!(
                "all() requires a SELECT statement, got '{}'",
                self.statement.raw
            )));
        }

        let filter = build_filter(&self.statement.raw, params)?;
        let mut body = Map::new();
        body.insert("filter".to_string(), Value::Object(filter));

        let response = self
            .store
            .executor
            .execute(Action::Find, &self.statement.collection, body)
            .await?;
        let find: FindResponse = serde_json::from_value(response)?;
        Ok(apply_sort_and_limit(find.documents, &self.statement.raw))
    }

    /// Executes a SELECT and returns the first matching document, or `None`.
    pub async fn get(&self, params: &Params) -> Result<Option<Value>> {
        Ok(self.all(params).await?.into_iter().next())
    }

    /// Executes a write statement (INSERT, UPDATE, DELETE).
    pub async fn run(&self, params: &Params) -> Result<WriteResult> {
        self.ensure_executable()?;
        let collection = &self.statement.collection;

        match self.statement.operation {
            Operation::Insert => {
                let document = build_document(&self.statement.raw, params)?;
                let mut body = Map::new();
                body.insert("document".to_string(), Value::Object(document));

                let response = self
                    .store
                    .executor
                    .execute(Action::InsertOne, collection, body)
                    .await?;
                let insert: InsertOneResponse = serde_json::from_value(response)?;
                Ok(WriteResult {
                    changes: 1,
                    inserted_id: insert.inserted_id,
                })
            }
            Operation::Update => {
                let filter = build_filter(&self.statement.raw, params)?;
                let update = build_update(&self.statement.raw, params)?;
                let mut body = Map::new();
                body.insert("filter".to_string(), Value::Object(filter));
                body.insert("update".to_string(), json!({ "$set": update }));

                let response = self
                    .store
                    .executor
                    .execute(Action::UpdateMany, collection, body)
                    .await?;
                let updated: UpdateManyResponse = serde_json::from_value(response)?;
                Ok(WriteResult {
                    changes: updated.modified_count,
                    inserted_id: None,
                })
            }
            Operation::Delete => {
                let filter = build_filter(&self.statement.raw, params)?;
                let mut body = Map::new();
                body.insert("filter".to_string(), Value::Object(filter));

                let response = self
                    .store
                    .executor
                    .execute(Action::DeleteMany, collection, body)
                    .await?;
                let deleted: DeleteManyResponse = serde_json::from_value(response)?;
                Ok(WriteResult {
                    changes: deleted.deleted_count,
                    inserted_id: None,
                })
            }
            Operation::Select | Operation::Other => Err(Error::Parse(format!(
                "run() requires a write statement, got '{}'",
                self.statement.raw
            ))),
        }
    }
}
