//! Index and template administration
//!
//! Thin passthrough over the engine's admin endpoints. Unlike data
//! operations, admin calls only count status 200 as success. Bodies for
//! index/template creation default to the provisioning set when the caller
//! does not supply their own.

pub mod dictionary;

pub use dictionary::DictionaryEditor;

use crate::client::{EngineRequest, EngineTransport};
use crate::config::{GatewayConfig, ProvisionConfig};
use crate::data::validate_identifier;
use crate::provision;
use crate::response::{body_value, Envelope};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

pub struct AdminService {
    transport: Arc<dyn EngineTransport>,
    provision: ProvisionConfig,
}

impl AdminService {
    pub fn new(transport: Arc<dyn EngineTransport>, config: &GatewayConfig) -> Self {
        Self {
            transport,
            provision: config.provision.clone(),
        }
    }

    /// Cluster-wide mapping or template listing
    pub async fn all_info(&self, kind: &str) -> Envelope {
        let path = match kind {
            "mapping" => "/_mapping",
            "template" => "/_template",
            _ => return Envelope::fail("error, wrong type"),
        };
        self.call(EngineRequest::get(path)).await
    }

    pub async fn query_index(&self, name: &str) -> Envelope {
        if let Err(err) = validate_identifier("index_name", name) {
            return Envelope::fail(err.to_string());
        }
        self.call(EngineRequest::get(format!("/{name}"))).await
    }

    /// Create an index; settings and mappings fall back to the provisioning
    /// defaults when the caller omits them
    pub async fn create_index(
        &self,
        name: &str,
        settings: Option<Value>,
        mappings: Option<Value>,
    ) -> Envelope {
        if let Err(err) = validate_identifier("index_name", name) {
            return Envelope::fail(err.to_string());
        }
        let body = json!({
            "settings": settings.unwrap_or_else(|| provision::index_settings(&self.provision)),
            "mappings": mappings.unwrap_or_else(|| provision::index_mappings(&self.provision)),
        });
        self.call(EngineRequest::put_json(format!("/{name}"), body))
            .await
    }

    pub async fn delete_index(&self, name: &str) -> Envelope {
        if let Err(err) = validate_identifier("index_name", name) {
            return Envelope::fail(err.to_string());
        }
        info!(index = %name, "deleting index");
        self.call(EngineRequest::delete(format!("/{name}"))).await
    }

    pub async fn query_template(&self, name: &str) -> Envelope {
        if let Err(err) = validate_identifier("template_name", name) {
            return Envelope::fail(err.to_string());
        }
        self.call(EngineRequest::get(format!("/_template/{name}")))
            .await
    }

    /// Create a template; the body is wrapped with `template`, `order` and
    /// `index_patterns` so it applies to every index named `{name}*`
    pub async fn create_template(
        &self,
        name: &str,
        settings: Option<Value>,
        mappings: Option<Value>,
    ) -> Envelope {
        if let Err(err) = validate_identifier("template_name", name) {
            return Envelope::fail(err.to_string());
        }
        let body = json!({
            "template": name,
            "order": 1,
            "index_patterns": [format!("{name}*")],
            "settings": settings.unwrap_or_else(|| provision::template_settings(&self.provision)),
            "mappings": mappings
                .unwrap_or_else(|| provision::template_mappings(name, &self.provision)),
        });
        self.call(EngineRequest::put_json(format!("/_template/{name}"), body))
            .await
    }

    pub async fn delete_template(&self, name: &str) -> Envelope {
        if let Err(err) = validate_identifier("template_name", name) {
            return Envelope::fail(err.to_string());
        }
        info!(template = %name, "deleting template");
        self.call(EngineRequest::delete(format!("/_template/{name}")))
            .await
    }

    async fn call(&self, request: EngineRequest) -> Envelope {
        match self.transport.execute(request).await {
            Ok(response) if response.status == 200 => Envelope::ok(body_value(&response.body)),
            Ok(response) => Envelope::fail_with(
                format!("engine returned status {}", response.status),
                body_value(&response.body),
            ),
            Err(err) => Envelope::fail(err.to_string()),
        }
    }
}
