//! Document operations: insert, bulk insert, fetch, delete, search
//!
//! Every method validates its identifiers before touching the network and
//! returns the result envelope; nothing here panics or propagates errors.

use crate::bulk::{self, BulkDoc};
use crate::client::{EngineRequest, EngineResponse, EngineTransport};
use crate::config::{BulkConfig, GatewayConfig, SearchDefaults};
use crate::error::GatewayError;
use crate::query::{translate, QuerySpec};
use crate::response::{body_value, Envelope};
use crate::Result;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct DataService {
    transport: Arc<dyn EngineTransport>,
    success_ceiling: u16,
    bulk: BulkConfig,
    search: SearchDefaults,
}

/// Reject empty or purely numeric index/type identifiers
///
/// A numeric identifier is almost always a caller mixing up the argument
/// order with a document id.
pub(crate) fn validate_identifier(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().all(|c| c.is_ascii_digit()) {
        return Err(GatewayError::illegal(kind));
    }
    Ok(())
}

/// Document ids are opaque strings, but a numeric id must be positive
fn valid_doc_id(id: &str) -> bool {
    if id.is_empty() {
        return false;
    }
    match id.parse::<i64>() {
        Ok(n) => n >= 1,
        Err(_) => true,
    }
}

impl DataService {
    pub fn new(transport: Arc<dyn EngineTransport>, config: &GatewayConfig) -> Self {
        Self {
            transport,
            success_ceiling: config.engine.success_ceiling,
            bulk: config.bulk.clone(),
            search: config.search.clone(),
        }
    }

    /// Upsert a single document
    pub async fn insert(&self, index: &str, type_name: &str, id: &str, doc: &Value) -> Envelope {
        if let Err(err) = self.validate_target(index, type_name) {
            return Envelope::fail(err.to_string());
        }
        if !valid_doc_id(id) {
            return Envelope::fail("illegal data id");
        }
        if is_empty_doc(doc) {
            return Envelope::fail("empty data");
        }

        let request = EngineRequest::post_json(
            format!("/{index}/{type_name}/{id}"),
            doc.clone(),
        );
        self.call(request).await
    }

    /// Batched upsert of an ordered document set
    ///
    /// Batches are submitted sequentially in input order. A failed batch is
    /// recorded and processing continues; already-applied batches are never
    /// rolled back. The envelope is success only when every batch succeeded,
    /// and `data` always carries the raw responses of the batches that did.
    pub async fn bulk_insert(&self, index: &str, type_name: &str, docs: &[BulkDoc]) -> Envelope {
        if let Err(err) = self.validate_target(index, type_name) {
            return Envelope::fail(err.to_string());
        }
        if docs.is_empty() {
            return Envelope::fail("empty data");
        }

        let path = format!("/{index}/{type_name}/_bulk");
        let mut failures: Vec<String> = Vec::new();
        let mut applied: Vec<Value> = Vec::new();

        for (no, batch) in bulk::chunk(docs, self.bulk.max_rows).into_iter().enumerate() {
            let payload = bulk::assemble(batch, index, type_name);
            let request = EngineRequest::post_ndjson(path.clone(), payload);
            match self.transport.execute(request).await {
                Ok(response) if response.status <= self.success_ceiling => {
                    applied.push(body_value(&response.body));
                }
                Ok(response) => {
                    failures.push(format!(
                        "batch {} failed with status {} ### {}",
                        no + 1,
                        response.status,
                        response.body
                    ));
                }
                Err(err) => {
                    failures.push(format!("batch {} failed: {err}", no + 1));
                }
            }
        }

        if failures.is_empty() {
            Envelope::ok(json!(applied))
        } else {
            Envelope::fail_with(
                format!("partial bulk failure: {}", failures.join(" ##### ")),
                json!(applied),
            )
        }
    }

    /// Fetch a single document by id
    pub async fn get_by_id(&self, index: &str, type_name: &str, id: &str) -> Envelope {
        if let Err(err) = self.validate_target(index, type_name) {
            return Envelope::fail(err.to_string());
        }
        if id.is_empty() {
            return Envelope::fail("illegal data id");
        }
        self.call(EngineRequest::get(format!("/{index}/{type_name}/{id}")))
            .await
    }

    /// Delete a single document by id
    pub async fn delete_by_id(&self, index: &str, type_name: &str, id: &str) -> Envelope {
        if let Err(err) = self.validate_target(index, type_name) {
            return Envelope::fail(err.to_string());
        }
        if id.is_empty() {
            return Envelope::fail("illegal data id");
        }
        self.call(EngineRequest::delete(format!("/{index}/{type_name}/{id}")))
            .await
    }

    /// Translate a query specification and execute the search
    pub async fn search(&self, index: &str, type_name: &str, spec: &QuerySpec) -> Envelope {
        if let Err(err) = self.validate_target(index, type_name) {
            return Envelope::fail(err.to_string());
        }
        let query = translate(spec, &self.search);
        self.call(EngineRequest::post_json(
            format!("/{index}/{type_name}/_search"),
            query,
        ))
        .await
    }

    /// Execute a caller-supplied raw query document verbatim
    pub async fn search_raw(&self, index: &str, type_name: &str, params: Value) -> Envelope {
        if let Err(err) = self.validate_target(index, type_name) {
            return Envelope::fail(err.to_string());
        }
        self.call(EngineRequest::post_json(
            format!("/{index}/{type_name}/_search"),
            params,
        ))
        .await
    }

    /// Translate without executing; the envelope carries the query document
    pub fn translate_query(&self, spec: &QuerySpec) -> Envelope {
        Envelope::ok(translate(spec, &self.search))
    }

    fn validate_target(&self, index: &str, type_name: &str) -> Result<()> {
        validate_identifier("index_name", index)?;
        validate_identifier("type_name", type_name)?;
        Ok(())
    }

    async fn call(&self, request: EngineRequest) -> Envelope {
        match self.transport.execute(request).await {
            Ok(response) => self.classify(response),
            Err(err) => Envelope::fail(err.to_string()),
        }
    }

    fn classify(&self, response: EngineResponse) -> Envelope {
        let data = body_value(&response.body);
        if response.status <= self.success_ceiling {
            Envelope::ok(data)
        } else {
            Envelope::fail_with(
                format!("engine returned status {}", response.status),
                data,
            )
        }
    }
}

fn is_empty_doc(doc: &Value) -> bool {
    match doc {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
