//! Translator from the reduced query specification to the engine's Query DSL
//!
//! `translate` is a pure, total function: malformed or missing optional
//! sections are omitted from the output, never reported as errors.

use crate::config::SearchDefaults;
use crate::query::types::{GeoFilter, QuerySpec, SortSpec};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Radius applied when a geo filter omits one
const DEFAULT_GEO_RADIUS: &str = "5km";

/// Fixed highlight markup pair
const HIGHLIGHT_PRE_TAG: &str = "<em class=\"cls_es_blue\" style=\"color:#0090f2\">";
const HIGHLIGHT_POST_TAG: &str = "</em>";

/// Reserved sort token expanded to a geo-distance sort
const GEO_SORT_TOKEN: &str = "geo";

/// Translate a query specification into an engine-native query document
pub fn translate(spec: &QuerySpec, defaults: &SearchDefaults) -> Value {
    let mut out = Map::new();

    let (text_clause, text_fields) = text_clause(spec);
    let filter_clauses = filter_clauses(spec);

    // Filters go into a non-scoring filter context so they narrow the result
    // set without affecting relevance; the text clause keeps scoring in must.
    let query = if filter_clauses.is_empty() {
        text_clause
    } else {
        let mut bool_query = Map::new();
        if let Some(clause) = text_clause {
            bool_query.insert("must".to_string(), json!([clause]));
        }
        bool_query.insert(
            "filter".to_string(),
            json!({"bool": {"must": filter_clauses}}),
        );
        Some(json!({"bool": bool_query}))
    };
    if let Some(query) = query {
        out.insert("query".to_string(), query);
    }

    if spec.highlight && !text_fields.is_empty() {
        out.insert("highlight".to_string(), highlight_clause(&text_fields));
    }

    let (from, size) = resolve_page(spec, defaults);
    out.insert("from".to_string(), json!(from));
    out.insert("size".to_string(), json!(size));

    out.insert("sort".to_string(), sort_clause(spec));

    if let Some(fields) = &spec.return_fields {
        out.insert("_source".to_string(), json!(fields));
    }

    Value::Object(out)
}

/// Build the text clause and record which fields participated (for highlighting)
fn text_clause(spec: &QuerySpec) -> (Option<Value>, Vec<String>) {
    let Some(tq) = &spec.text_query else {
        return (None, Vec::new());
    };
    if tq.fields.is_empty() {
        return (None, Vec::new());
    }

    let operator = if tq.exact { "and" } else { "or" };

    let clause = if tq.fields.len() == 1 {
        json!({
            "match": {
                (tq.fields[0].as_str()): {"query": tq.value, "operator": operator}
            }
        })
    } else {
        json!({
            "multi_match": {
                "query": tq.value,
                "type": "best_fields",
                "operator": operator,
                "fields": tq.fields,
            }
        })
    };

    (Some(clause), tq.fields.clone())
}

/// One clause per filter entry, in order equal -> in -> range -> geo
fn filter_clauses(spec: &QuerySpec) -> Vec<Value> {
    let Some(filters) = &spec.filters else {
        return Vec::new();
    };

    let mut clauses = Vec::new();
    for (field, value) in &filters.equal {
        clauses.push(json!({"term": {(field.as_str()): value}}));
    }
    for (field, values) in &filters.r#in {
        clauses.push(json!({"terms": {(field.as_str()): values}}));
    }
    for (field, range) in &filters.range {
        if range.is_empty() {
            continue;
        }
        let mut bounds = Map::new();
        if let Some(v) = &range.gte {
            bounds.insert("gte".to_string(), v.clone());
        }
        if let Some(v) = &range.lte {
            bounds.insert("lte".to_string(), v.clone());
        }
        if let Some(v) = &range.gt {
            bounds.insert("gt".to_string(), v.clone());
        }
        if let Some(v) = &range.lt {
            bounds.insert("lt".to_string(), v.clone());
        }
        clauses.push(json!({"range": {(field.as_str()): bounds}}));
    }
    if let Some(geo) = &filters.geo {
        clauses.push(json!({"geo_distance": {
            (geo.field.as_str()): {"lat": geo.lat, "lon": geo.lon},
            "distance": geo.distance_radius.as_deref().unwrap_or(DEFAULT_GEO_RADIUS),
        }}));
    }
    clauses
}

fn highlight_clause(fields: &[String]) -> Value {
    let mut field_map = Map::new();
    for field in fields {
        field_map.insert(field.clone(), json!({}));
    }
    json!({
        "fields": field_map,
        "pre_tags": [HIGHLIGHT_PRE_TAG],
        "post_tags": [HIGHLIGHT_POST_TAG],
    })
}

/// Resolve `(from, size)` from the pagination section
///
/// Size: absent or non-positive falls back to the default; values above the
/// max page size jump to the overflow size instead of clamping (legacy
/// clients depend on this). Offset: 1-based page, page 1 == offset 0.
fn resolve_page(spec: &QuerySpec, defaults: &SearchDefaults) -> (i64, i64) {
    let mut size = defaults.default_size;
    let mut from = 0;

    if let Some(page) = &spec.page {
        if let Some(page_size) = page.page_size {
            size = if page_size <= 0 {
                defaults.default_size
            } else if page_size > defaults.max_page_size {
                defaults.overflow_size
            } else {
                page_size
            };
        }
        if let Some(current) = page.current_page {
            if current > 1 {
                from = (current - 1) * size;
            }
        }
    }

    (from, size)
}

/// Build the sort list
///
/// First occurrence of a field wins; later duplicates are skipped. The
/// reserved `"geo"` token borrows the geo filter's center; without a geo
/// filter it is dropped rather than invented. An absent, empty, or
/// fully-dropped list falls back to score-then-index descending.
fn sort_clause(spec: &QuerySpec) -> Value {
    let geo = spec.filters.as_ref().and_then(|f| f.geo.as_ref());

    let mut entries = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for sort in spec.sort.as_deref().unwrap_or_default() {
        if !seen.insert(sort.field.as_str()) {
            continue;
        }
        if sort.field == GEO_SORT_TOKEN {
            if let Some(entry) = geo_sort_entry(sort, geo) {
                entries.push(entry);
            }
        } else {
            entries.push(json!({(sort.field.as_str()): {"order": order_of(sort)}}));
        }
    }

    if entries.is_empty() {
        return json!([
            {"_score": {"order": "desc"}},
            {"_index": {"order": "desc"}},
        ]);
    }
    json!(entries)
}

fn geo_sort_entry(sort: &SortSpec, geo: Option<&GeoFilter>) -> Option<Value> {
    let geo = geo?;
    Some(json!({"_geo_distance": {
        (geo.field.as_str()): {"lat": geo.lat, "lon": geo.lon},
        "order": order_of(sort),
        "unit": "km",
    }}))
}

fn order_of(sort: &SortSpec) -> &'static str {
    if sort.direction == "desc" {
        "desc"
    } else {
        "asc"
    }
}
