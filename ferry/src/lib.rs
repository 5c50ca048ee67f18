//! Core gateway library for an Elasticsearch-compatible search engine
//!
//! Callers never speak the engine's native Query DSL. They submit a reduced
//! [`QuerySpec`](query::QuerySpec), which the translator maps to a native
//! request body, and the gateway forwards it over HTTP. Document writes go
//! through the same path, with bulk writes split into size-bounded batches.
//!
//! # Components
//!
//! - [`query::translator`] - pure `QuerySpec` -> engine query document mapping
//! - [`bulk`] - batch chunking and NDJSON payload assembly
//! - [`client`] - HTTP transport adapter with fixed timeout and optional retry
//! - [`data`] - document operations (insert, bulk, get, delete, search)
//! - [`admin`] - index/template passthrough and the custom dictionary editor
//! - [`provision`] - default template/index bodies for first-time setup
//!
//! Every public service operation returns an [`Envelope`](response::Envelope)
//! (`{code, message, data}`); errors never escape the crate boundary as
//! unhandled faults.

pub mod admin;
pub mod bulk;
pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod provision;
pub mod query;
pub mod response;

pub use admin::{AdminService, DictionaryEditor};
pub use client::{EngineClient, EngineResponse, EngineTransport, RetryPolicy};
pub use config::GatewayConfig;
pub use data::DataService;
pub use error::GatewayError;
pub use provision::Provisioner;
pub use query::QuerySpec;
pub use response::Envelope;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
