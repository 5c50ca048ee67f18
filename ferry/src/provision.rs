//! Default index/template bodies for first-time engine setup
//!
//! One canonical default set, driven by [`ProvisionConfig`]. Index settings
//! carry the shard/replica/refresh/result-window knobs; template settings add
//! the analysis chain (pinyin filters plus custom analyzers on the configured
//! tokenizer) so dynamic string fields are searchable in both scripts.

use crate::client::{EngineRequest, EngineTransport};
use crate::config::{GatewayConfig, ProvisionConfig};
use crate::data::validate_identifier;
use crate::response::{body_value, Envelope};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Settings block for a new index
pub fn index_settings(config: &ProvisionConfig) -> Value {
    json!({
        "number_of_shards": config.number_of_shards,
        "number_of_replicas": config.number_of_replicas,
        "refresh_interval": config.refresh_interval,
        "max_result_window": config.max_result_window,
    })
}

/// Mappings block for a new index
///
/// Dynamic string fields get the configured analyzer plus a `raw` keyword
/// sub-field for exact matching and sorting.
pub fn index_mappings(config: &ProvisionConfig) -> Value {
    json!({
        "_default_": {
            "_all": {"enabled": true},
            "_source": {"enabled": true},
            "dynamic_templates": [
                {
                    "strings": {
                        "match_mapping_type": "string",
                        "mapping": {
                            "type": "text",
                            "analyzer": config.analyzer,
                            "search_analyzer": config.analyzer,
                            "fields": {
                                "raw": {"type": "keyword", "ignore_above": 256}
                            }
                        }
                    }
                }
            ]
        }
    })
}

/// Settings block for a new template, including the analysis chain
pub fn template_settings(config: &ProvisionConfig) -> Value {
    json!({
        "number_of_shards": config.number_of_shards,
        "number_of_replicas": config.number_of_replicas,
        "refresh_interval": config.refresh_interval,
        "analysis": {
            "filter": {
                "pinyin_full_filter": {
                    "type": "pinyin",
                    "lowercase": "true",
                    "keep_full_pinyin": "true",
                    "keep_joined_full_pinyin": "true",
                    "keep_original": "false",
                    "keep_first_letter": "false",
                    "keep_separate_first_letter": "false",
                    "keep_none_chinese": "false",
                    "limit_first_letter_length": "50"
                },
                "pinyin_simple_filter": {
                    "type": "pinyin",
                    "lowercase": "true",
                    "keep_full_pinyin": "false",
                    "keep_joined_full_pinyin": "true",
                    "keep_original": "true",
                    "keep_first_letter": "true",
                    "keep_separate_first_letter": "false",
                    "none_chinese_pinyin_tokenize": "false",
                    "padding_char": " "
                }
            },
            "analyzer": {
                "pinyinFullIndexAnalyzer": {
                    "type": "custom",
                    "tokenizer": config.analyzer,
                    "filter": ["asciifolding", "lowercase", "pinyin_full_filter"]
                },
                "pinyinSimpleIndexAnalyzer": {
                    "type": "custom",
                    "tokenizer": config.analyzer,
                    "filter": ["pinyin_simple_filter", "lowercase"]
                },
                "textIndexAnalyzer": {
                    "type": "custom",
                    "tokenizer": config.analyzer,
                    "filter": ["asciifolding", "lowercase"]
                }
            }
        }
    })
}

/// Mappings block for a new template
///
/// Keyed by `{name}_type`. Dynamic templates map id-like longs to integers,
/// localized string suffixes to analyzed text, date-like strings to dates
/// and the `location` field to a geo_point; named text fields additionally
/// carry full/simple pinyin sub-fields.
pub fn template_mappings(template_name: &str, config: &ProvisionConfig) -> Value {
    let text_mapping = json!({
        "type": "text",
        "analyzer": config.analyzer,
        "search_analyzer": config.analyzer,
        "fields": {
            "raw": {"type": "keyword", "ignore_above": 256}
        }
    });
    let named_text = json!({
        "type": "text",
        "analyzer": "textIndexAnalyzer",
        "fields": {
            "fpy": {"type": "text", "index": true, "analyzer": "pinyinFullIndexAnalyzer"},
            "spy": {"type": "text", "index": true, "analyzer": "pinyinSimpleIndexAnalyzer"},
            "raw": {"type": "keyword", "ignore_above": 50}
        }
    });

    json!({
        (format!("{template_name}_type")): {
            "_all": {"enabled": true},
            "_source": {"enabled": true},
            "dynamic": "true",
            "dynamic_templates": [
                {
                    "id_fields": {
                        "match_pattern": "regex",
                        "match": "[a-z_]*(id){1}|[a-z]*(_num){1}|[a-z]*(_type){1}|[a-z]*(_star){1}",
                        "match_mapping_type": "long",
                        "mapping": {
                            "type": "integer",
                            "fields": {"raw": {"type": "keyword"}}
                        }
                    }
                },
                {
                    "score_fields": {
                        "match_pattern": "regex",
                        "match": "([a-z]*(_score_){1}[a-z]*)",
                        "match_mapping_type": "double",
                        "mapping": {
                            "type": "float",
                            "fields": {"raw": {"type": "keyword"}}
                        }
                    }
                },
                {
                    "cn_fields": {
                        "match": "*_cn",
                        "match_mapping_type": "string",
                        "mapping": text_mapping
                    }
                },
                {
                    "en_fields": {
                        "match": "*_en",
                        "match_mapping_type": "string",
                        "mapping": text_mapping
                    }
                },
                {
                    "py_fields": {
                        "match": "*_py",
                        "match_mapping_type": "string",
                        "mapping": text_mapping
                    }
                },
                {
                    "date_fields": {
                        "match_pattern": "regex",
                        "match": "[a-z_]*(date){1}|[a-z_]*(time){1}",
                        "match_mapping_type": "string",
                        "mapping": {
                            "type": "date",
                            "format": "epoch_millis||strict_date_optional_time"
                        }
                    }
                },
                {
                    "geo_fields": {
                        "match": "location",
                        "match_mapping_type": "string",
                        "mapping": {"type": "geo_point"}
                    }
                }
            ],
            "properties": {
                "location": {"type": "geo_point"},
                "name_cn": named_text,
                "name_en": named_text
            }
        }
    })
}

/// Full template document, ready to PUT to `/_template/{name}`
pub fn template_body(template_name: &str, config: &ProvisionConfig) -> Value {
    json!({
        "template": template_name,
        "order": 1,
        "index_patterns": [format!("{template_name}*")],
        "settings": template_settings(config),
        "mappings": template_mappings(template_name, config),
    })
}

/// Full index document, ready to PUT to `/{name}`
pub fn index_body(config: &ProvisionConfig) -> Value {
    json!({
        "settings": index_settings(config),
        "mappings": index_mappings(config),
    })
}

/// Outcome of a provisioning run
pub struct ProvisionReport {
    pub template: Envelope,
    pub index: Envelope,
}

/// PUTs the default template and index for the configured target
pub struct Provisioner {
    transport: Arc<dyn EngineTransport>,
    index: String,
    provision: ProvisionConfig,
}

impl Provisioner {
    pub fn new(transport: Arc<dyn EngineTransport>, config: &GatewayConfig) -> Self {
        Self {
            transport,
            index: config.engine.index.clone(),
            provision: config.provision.clone(),
        }
    }

    /// Create the template first, then the index it applies to
    pub async fn run(&self) -> ProvisionReport {
        let template = self.put_template().await;
        let index = self.put_index().await;
        ProvisionReport { template, index }
    }

    async fn put_template(&self) -> Envelope {
        if let Err(err) = validate_identifier("template_name", &self.index) {
            return Envelope::fail(err.to_string());
        }
        let body = template_body(&self.index, &self.provision);
        info!(template = %self.index, "provisioning template");
        self.put(format!("/_template/{}", self.index), body).await
    }

    async fn put_index(&self) -> Envelope {
        if let Err(err) = validate_identifier("index_name", &self.index) {
            return Envelope::fail(err.to_string());
        }
        let body = index_body(&self.provision);
        info!(index = %self.index, "provisioning index");
        self.put(format!("/{}", self.index), body).await
    }

    async fn put(&self, path: String, body: Value) -> Envelope {
        match self
            .transport
            .execute(EngineRequest::put_json(path, body))
            .await
        {
            Ok(response) if response.status == 200 => Envelope::ok(body_value(&response.body)),
            Ok(response) => Envelope::fail_with(
                format!("engine returned status {}", response.status),
                body_value(&response.body),
            ),
            Err(err) => Envelope::fail(err.to_string()),
        }
    }
}
