//! Route table for the gateway's HTTP surface
//!
//! Two groups: `/config` for index/template/dictionary administration and
//! `/data` for document operations. Every handler answers HTTP 200 with a
//! result envelope; `code` carries success or failure.

use crate::endpoints;
use axum::routing::{get, post};
use axum::Router;
use ferry::{AdminService, DataService, DictionaryEditor};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<DataService>,
    pub admin: Arc<AdminService>,
    pub dictionary: Arc<DictionaryEditor>,
    /// Target index when a request does not name one
    pub default_index: String,
    pub default_type: String,
}

pub fn build_router(state: AppState) -> Router {
    let config_routes = Router::new()
        .route("/", get(endpoints::admin::route_list))
        .route("/index", get(endpoints::admin::all_indices))
        .route("/index/get", get(endpoints::admin::query_index))
        .route("/index/create", post(endpoints::admin::create_index))
        .route("/index/delete", post(endpoints::admin::delete_index))
        .route("/template", get(endpoints::admin::all_templates))
        .route("/template/get", get(endpoints::admin::query_template))
        .route("/template/create", post(endpoints::admin::create_template))
        .route("/template/delete", post(endpoints::admin::delete_template))
        .route("/ik", get(endpoints::admin::dictionary_list))
        .route("/ik/add", get(endpoints::admin::dictionary_add));

    let data_routes = Router::new()
        .route("/", get(endpoints::data::route_list))
        .route("/insert", post(endpoints::data::insert))
        .route("/bulk", post(endpoints::data::bulk))
        .route("/delete/:id", post(endpoints::data::delete))
        .route(
            "/:index_name/:type_name/:id",
            get(endpoints::data::get_by_id),
        )
        .route("/query", post(endpoints::data::query))
        .route("/rawquery", post(endpoints::data::raw_query));

    Router::new()
        .route("/", get(welcome))
        .nest("/config", config_routes)
        .nest("/data", data_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> &'static str {
    "Welcome to the ferry search gateway API"
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use ferry::client::{EngineRequest, EngineResponse, EngineTransport};
    use ferry::config::GatewayConfig;
    use ferry::{Envelope, GatewayError};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Transport that answers every call with 200 and an empty object
    struct StubTransport;

    #[async_trait]
    impl EngineTransport for StubTransport {
        async fn execute(&self, _: EngineRequest) -> Result<EngineResponse, GatewayError> {
            Ok(EngineResponse {
                status: 200,
                body: "{}".to_string(),
            })
        }
    }

    fn test_router() -> Router {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GatewayConfig::default();
        config.dictionary.path = dir
            .path()
            .join("es_ik_custom.txt")
            .to_string_lossy()
            .into_owned();
        // keep the directory alive for the whole test process
        std::mem::forget(dir);

        let transport: Arc<dyn EngineTransport> = Arc::new(StubTransport);
        build_router(AppState {
            data: Arc::new(DataService::new(transport.clone(), &config)),
            admin: Arc::new(AdminService::new(transport, &config)),
            dictionary: Arc::new(DictionaryEditor::new(&config.dictionary)),
            default_index: config.engine.index.clone(),
            default_type: config.engine.type_name.clone(),
        })
    }

    async fn envelope_of(response: axum::response::Response) -> Envelope {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_all_routes_match() {
        let cases = vec![
            ("GET", "/"),
            ("GET", "/config"),
            ("GET", "/config/index"),
            ("GET", "/config/index/get"),
            ("POST", "/config/index/create"),
            ("POST", "/config/index/delete"),
            ("GET", "/config/template"),
            ("GET", "/config/template/get"),
            ("POST", "/config/template/create"),
            ("POST", "/config/template/delete"),
            ("GET", "/config/ik"),
            ("GET", "/config/ik/add"),
            ("GET", "/data"),
            ("POST", "/data/insert"),
            ("POST", "/data/bulk"),
            ("POST", "/data/delete/42"),
            ("GET", "/data/chotel/chotel_type/42"),
            ("POST", "/data/query"),
            ("POST", "/data/rawquery"),
        ];

        for (method, path) in cases {
            let req = Request::builder()
                .method(method)
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap();

            let resp = test_router().oneshot(req).await.unwrap();
            assert_ne!(
                resp.status(),
                StatusCode::NOT_FOUND,
                "Route {method} {path} should match but got 404"
            );
        }
    }

    #[tokio::test]
    async fn test_route_lists_are_enveloped() {
        for path in ["/config", "/data"] {
            let req = Request::builder()
                .uri(path)
                .body(Body::empty())
                .unwrap();
            let resp = test_router().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);

            let env = envelope_of(resp).await;
            assert!(env.is_ok());
            assert!(env.data.as_object().map(|m| !m.is_empty()).unwrap_or(false));
        }
    }

    #[tokio::test]
    async fn test_malformed_body_yields_failure_envelope_not_http_error() {
        let req = Request::builder()
            .method("POST")
            .uri("/data/insert")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let resp = test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let env = envelope_of(resp).await;
        assert_eq!(env.code, -1);
    }

    #[tokio::test]
    async fn test_insert_roundtrip_through_stub_engine() {
        let body = serde_json::json!({
            "index_name": "chotel",
            "type_name": "chotel_type",
            "data": {"346309": {"hotel_product_id": 346309}}
        });
        let req = Request::builder()
            .method("POST")
            .uri("/data/insert")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let resp = test_router().oneshot(req).await.unwrap();
        let env = envelope_of(resp).await;
        assert!(env.is_ok(), "unexpected failure: {}", env.message);
    }

    #[tokio::test]
    async fn test_query_index_requires_name() {
        let req = Request::builder()
            .uri("/config/index/get")
            .body(Body::empty())
            .unwrap();
        let resp = test_router().oneshot(req).await.unwrap();
        let env = envelope_of(resp).await;
        assert_eq!(env.code, -1);
        assert!(env.message.contains("index_name"));
    }
}
