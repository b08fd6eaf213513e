//! # docbridge
//!
//! A compatibility shim that lets SQL-shaped call sites run against an
//! HTTP document store without rewriting every call site.
//!
//! Statements are classified at `prepare` time by keyword scanning; the
//! supported subset (single-predicate SELECT/INSERT/UPDATE/DELETE) is
//! translated per call into store actions (`find`, `insertOne`,
//! `updateMany`, `deleteMany`) issued as JSON POSTs against
//! `{endpoint}/action/{action}`. The method surface mirrors the embedded
//! engine it replaces — `prepare`/`all`/`get`/`run`/`exec`/`pragma`/
//! `transaction` — but every execution method is explicitly `async`, and
//! `transaction` is shape compatibility only: it provides no atomicity.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docbridge::{DocumentStore, Params, StoreConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(StoreConfig::load()?)?;
//!
//!     let insert = store.prepare("INSERT INTO orders (customerId, total) VALUES (?, ?)");
//!     let written = insert.run(&Params::from(vec![json!("c-118"), json!(129.9)])).await?;
//!     println!("inserted id: {:?}", written.inserted_id);
//!
//!     let recent = store.prepare("SELECT * FROM orders WHERE customerId = ? ORDER BY date DESC LIMIT 20");
//!     let orders = recent.all(&Params::from(vec![json!("c-118")])).await?;
//!     println!("{} orders", orders.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod executor;
pub mod shim;
pub mod sql;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use executor::{Action, RemoteExecutor};
pub use shim::{DocumentStore, PreparedStatement, WriteResult};
pub use sql::{classify, Operation, Params, Statement};
