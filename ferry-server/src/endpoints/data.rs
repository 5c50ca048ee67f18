//! `/data` handlers: document writes, reads and search
//!
//! `index_name` and `type_name` fall back to the configured defaults when a
//! request omits them. Insert and bulk take `data` as an id-to-document map;
//! map order is submission order.

use crate::endpoints::parse_body;
use crate::router::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use ferry::bulk::BulkDoc;
use ferry::query::QuerySpec;
use ferry::Envelope;
use serde_json::{json, Map, Value};

/// GET /data - the group's registered routes
pub async fn route_list() -> Json<Envelope> {
    Json(Envelope::ok(json!({
        "/data": "GET",
        "/data/insert": "POST",
        "/data/bulk": "POST",
        "/data/delete/{id}": "POST",
        "/data/{index_name}/{type_name}/{id}": "GET",
        "/data/query": "POST",
        "/data/rawquery": "POST",
    })))
}

fn target(state: &AppState, body: &Value) -> (String, String) {
    let index = body
        .get("index_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(&state.default_index)
        .to_string();
    let type_name = body
        .get("type_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(&state.default_type)
        .to_string();
    (index, type_name)
}

/// The id-to-document map under `data`, in declaration order
fn doc_map(body: &Value) -> Result<&Map<String, Value>, Envelope> {
    body.get("data")
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| Envelope::fail("empty data"))
}

/// POST /data/insert - `{index_name?, type_name?, data: {id: doc}}`
pub async fn insert(State(state): State<AppState>, body: Bytes) -> Json<Envelope> {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(env) => return Json(env),
    };
    let docs = match doc_map(&body) {
        Ok(docs) => docs,
        Err(env) => return Json(env),
    };
    if docs.len() > 1 {
        return Json(Envelope::fail("multiple documents, use /data/bulk"));
    }
    let (index, type_name) = target(&state, &body);
    // sole entry, checked above
    let Some((id, doc)) = docs.iter().next() else {
        return Json(Envelope::fail("empty data"));
    };
    Json(state.data.insert(&index, &type_name, id, doc).await)
}

/// POST /data/bulk - `{index_name?, type_name?, data: {id: doc, ...}}`
pub async fn bulk(State(state): State<AppState>, body: Bytes) -> Json<Envelope> {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(env) => return Json(env),
    };
    let docs = match doc_map(&body) {
        Ok(docs) => docs,
        Err(env) => return Json(env),
    };
    let (index, type_name) = target(&state, &body);
    let docs: Vec<BulkDoc> = docs
        .iter()
        .map(|(id, doc)| (id.clone(), doc.clone()))
        .collect();
    Json(state.data.bulk_insert(&index, &type_name, &docs).await)
}

/// POST /data/delete/{id} - optional `{index_name?, type_name?}` body
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Json<Envelope> {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(env) => return Json(env),
    };
    let (index, type_name) = target(&state, &body);
    Json(state.data.delete_by_id(&index, &type_name, &id).await)
}

/// GET /data/{index_name}/{type_name}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((index, type_name, id)): Path<(String, String, String)>,
) -> Json<Envelope> {
    Json(state.data.get_by_id(&index, &type_name, &id).await)
}

/// POST /data/query - `{index_name?, type_name?, params: QuerySpec}`
pub async fn query(State(state): State<AppState>, body: Bytes) -> Json<Envelope> {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(env) => return Json(env),
    };
    // a missing spec is the default query (default sort, default page size)
    let spec = match body.get("params") {
        None | Some(Value::Null) => QuerySpec::default(),
        Some(params) => match serde_json::from_value(params.clone()) {
            Ok(spec) => spec,
            Err(e) => return Json(Envelope::fail(format!("invalid params: {e}"))),
        },
    };
    let (index, type_name) = target(&state, &body);
    Json(state.data.search(&index, &type_name, &spec).await)
}

/// POST /data/rawquery - `{index_name?, type_name?, params: <raw query>}`
pub async fn raw_query(State(state): State<AppState>, body: Bytes) -> Json<Envelope> {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(env) => return Json(env),
    };
    let Some(params) = body.get("params").cloned() else {
        return Json(Envelope::fail("empty params"));
    };
    let (index, type_name) = target(&state, &body);
    Json(state.data.search_raw(&index, &type_name, params).await)
}
