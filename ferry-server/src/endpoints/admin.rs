//! `/config` handlers: index, template and dictionary administration

use crate::endpoints::{parse_body, required_str};
use crate::router::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use ferry::Envelope;
use serde::Deserialize;
use serde_json::json;

/// GET /config - the group's registered routes
pub async fn route_list() -> Json<Envelope> {
    Json(Envelope::ok(json!({
        "/config": "GET",
        "/config/index": "GET",
        "/config/index/get": "GET",
        "/config/index/create": "POST",
        "/config/index/delete": "POST",
        "/config/template": "GET",
        "/config/template/get": "GET",
        "/config/template/create": "POST",
        "/config/template/delete": "POST",
        "/config/ik": "GET",
        "/config/ik/add": "GET",
    })))
}

#[derive(Deserialize)]
pub struct IndexQuery {
    #[serde(default)]
    index_name: Option<String>,
}

#[derive(Deserialize)]
pub struct TemplateQuery {
    #[serde(default)]
    template_name: Option<String>,
}

#[derive(Deserialize)]
pub struct DictionaryQuery {
    #[serde(default)]
    key_word: Option<String>,
}

/// GET /config/index - every index mapping
pub async fn all_indices(State(state): State<AppState>) -> Json<Envelope> {
    Json(state.admin.all_info("mapping").await)
}

/// GET /config/index/get?index_name=
pub async fn query_index(
    State(state): State<AppState>,
    Query(params): Query<IndexQuery>,
) -> Json<Envelope> {
    let Some(name) = params.index_name.filter(|n| !n.is_empty()) else {
        return Json(Envelope::fail("empty index_name"));
    };
    Json(state.admin.query_index(&name).await)
}

/// POST /config/index/create - `{index_name, settings?, mappings?}`
pub async fn create_index(State(state): State<AppState>, body: Bytes) -> Json<Envelope> {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(env) => return Json(env),
    };
    let name = match required_str(&body, "index_name") {
        Ok(name) => name.to_string(),
        Err(env) => return Json(env),
    };
    let settings = body.get("settings").cloned();
    let mappings = body.get("mappings").cloned();
    Json(state.admin.create_index(&name, settings, mappings).await)
}

/// POST /config/index/delete - `{index_name}`
pub async fn delete_index(State(state): State<AppState>, body: Bytes) -> Json<Envelope> {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(env) => return Json(env),
    };
    match required_str(&body, "index_name") {
        Ok(name) => Json(state.admin.delete_index(name).await),
        Err(env) => Json(env),
    }
}

/// GET /config/template - every template
pub async fn all_templates(State(state): State<AppState>) -> Json<Envelope> {
    Json(state.admin.all_info("template").await)
}

/// GET /config/template/get?template_name=
pub async fn query_template(
    State(state): State<AppState>,
    Query(params): Query<TemplateQuery>,
) -> Json<Envelope> {
    let Some(name) = params.template_name.filter(|n| !n.is_empty()) else {
        return Json(Envelope::fail("empty template_name"));
    };
    Json(state.admin.query_template(&name).await)
}

/// POST /config/template/create - `{template_name, settings?, mappings?}`
pub async fn create_template(State(state): State<AppState>, body: Bytes) -> Json<Envelope> {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(env) => return Json(env),
    };
    let name = match required_str(&body, "template_name") {
        Ok(name) => name.to_string(),
        Err(env) => return Json(env),
    };
    let settings = body.get("settings").cloned();
    let mappings = body.get("mappings").cloned();
    Json(state.admin.create_template(&name, settings, mappings).await)
}

/// POST /config/template/delete - `{template_name}`
pub async fn delete_template(State(state): State<AppState>, body: Bytes) -> Json<Envelope> {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(env) => return Json(env),
    };
    match required_str(&body, "template_name") {
        Ok(name) => Json(state.admin.delete_template(name).await),
        Err(env) => Json(env),
    }
}

/// GET /config/ik - current dictionary words
pub async fn dictionary_list(State(state): State<AppState>) -> Json<Envelope> {
    Json(state.dictionary.list())
}

/// GET /config/ik/add?key_word=one,two
pub async fn dictionary_add(
    State(state): State<AppState>,
    Query(params): Query<DictionaryQuery>,
) -> Json<Envelope> {
    let Some(words) = params.key_word.filter(|w| !w.is_empty()) else {
        return Json(Envelope::fail("empty key_word"));
    };
    Json(state.dictionary.add(&words))
}
