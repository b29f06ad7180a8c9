#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::{Locale, RelayConfig};
    use crate::http::{create_router, AppState, CHART_PATH, RELAY_PATH};
    use crate::relay::{TransportError, UpstreamClient, UpstreamResponse};

    const UPSTREAM: &str = "https://script.google.com/macros/s/abc/exec";

    struct StubUpstream {
        response: Result<UpstreamResponse, String>,
        calls: AtomicUsize,
        last_url: Mutex<Option<String>>,
    }

    impl StubUpstream {
        fn new(status: u16, content_type: &str, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(UpstreamResponse {
                    status,
                    content_type: Some(content_type.to_string()),
                    final_url: UPSTREAM.to_string(),
                    body: body.to_string(),
                }),
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Err(message.to_string()),
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UpstreamClient for StubUpstream {
        async fn get(&self, url: &str) -> Result<UpstreamResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_url.lock().unwrap() = Some(url.to_string());
            self.response.clone().map_err(TransportError::Other)
        }
    }

    fn state(config: RelayConfig, upstream: Arc<StubUpstream>) -> AppState {
        AppState::new(config, upstream)
    }

    async fn send(state: AppState, method: Method, uri: &str) -> Response {
        create_router(state)
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::from("ignored body"))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_non_get_methods_are_rejected() {
        let methods = [
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
            Method::HEAD,
        ];
        for path in [RELAY_PATH, CHART_PATH] {
            for method in methods.clone() {
                let upstream = StubUpstream::new(200, "application/json", "{}");
                let app = state(RelayConfig::with_upstream(UPSTREAM), upstream.clone());
                let is_head = method == Method::HEAD;
                let response = send(app, method.clone(), &format!("{}?x=1", path)).await;

                assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {path}");
                assert_eq!(response.headers()[header::ALLOW], "GET");
                // HEAD responses never carry a body.
                if !is_head {
                    assert_eq!(body_json(response).await, json!({"error": "Method not allowed"}));
                }
                assert_eq!(upstream.calls(), 0);
            }
        }
    }

    #[tokio::test]
    async fn test_options_with_origin_only_is_rejected() {
        let upstream = StubUpstream::new(200, "application/json", "{}");
        let response = create_router(state(RelayConfig::with_upstream(UPSTREAM), upstream.clone()))
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(RELAY_PATH)
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET");
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_cors_preflight_is_answered() {
        let upstream = StubUpstream::new(200, "application/json", "{}");
        let response = create_router(state(RelayConfig::with_upstream(UPSTREAM), upstream.clone()))
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(RELAY_PATH)
                    .header(header::ORIGIN, "https://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .contains("GET"));
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_config_returns_500_without_calling_upstream() {
        let upstream = StubUpstream::new(200, "application/json", "{}");
        let response = send(
            state(RelayConfig::default(), upstream.clone()),
            Method::GET,
            RELAY_PATH,
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Missing environment variable: GAS_API_URL"})
        );
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_404_becomes_502() {
        let upstream = StubUpstream::new(404, "text/plain", "not found");
        let response = send(
            state(RelayConfig::with_upstream(UPSTREAM), upstream),
            Method::GET,
            RELAY_PATH,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Bad response from GAS");
        assert_eq!(body["status"], 404);
        assert_eq!(body["body"], "not found");
    }

    #[tokio::test]
    async fn test_html_response_carries_hint() {
        let upstream = StubUpstream::new(200, "text/html", "<!doctype html><html><body>Sign in</body></html>");
        let response = send(
            state(RelayConfig::with_upstream(UPSTREAM), upstream),
            Method::GET,
            RELAY_PATH,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Non-JSON response from GAS");
        assert_eq!(body["contentType"], "text/html");
        assert_eq!(body["url"], UPSTREAM);
        assert!(!body["hint"].as_str().unwrap().is_empty());
        assert!(body["bodySnippet"].as_str().unwrap().starts_with("<!doctype html>"));
    }

    #[tokio::test]
    async fn test_json_passthrough_with_cache_header() {
        let upstream = StubUpstream::new(200, "application/json; charset=utf-8", r#"{"a":1}"#);
        let response = send(
            state(RelayConfig::with_upstream(UPSTREAM), upstream),
            Method::GET,
            RELAY_PATH,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "s-maxage=300, stale-while-revalidate=60"
        );
        assert_eq!(body_json(response).await, json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_query_is_forwarded() {
        let upstream = StubUpstream::new(200, "application/json", "[]");
        let config = RelayConfig::with_upstream(format!("{}?key=abc", UPSTREAM));
        let response = send(
            state(config, upstream.clone()),
            Method::GET,
            &format!("{}?days=7&sheet=views", RELAY_PATH),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            upstream.last_url.lock().unwrap().as_deref(),
            Some("https://script.google.com/macros/s/abc/exec?key=abc&days=7&sheet=views")
        );
    }

    #[tokio::test]
    async fn test_transport_failure_returns_500() {
        let upstream = StubUpstream::failing("error sending request");
        let response = send(
            state(RelayConfig::with_upstream(UPSTREAM), upstream),
            Method::GET,
            RELAY_PATH,
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Fetch failed", "message": "error sending request"})
        );
    }

    #[tokio::test]
    async fn test_chart_endpoint_aligns_series() {
        let payload = json!([
            {"title": "A", "data": [{"date": "2024-01-02", "viewCount": 5}]},
            {"title": "B", "data": [{"date": "2024-01-01", "viewCount": "3"}]}
        ]);
        let upstream = StubUpstream::new(200, "application/json", &payload.to_string());
        let mut config = RelayConfig::with_upstream(UPSTREAM);
        config.locale = Locale::En;
        let response = send(state(config, upstream), Method::GET, CHART_PATH).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "s-maxage=300, stale-while-revalidate=60"
        );
        let body = body_json(response).await;
        assert_eq!(body["labels"], json!(["2024-01-01", "2024-01-02"]));
        assert_eq!(body["series"][0]["values"], json!([null, 5.0]));
        assert_eq!(body["series"][1]["values"], json!([3.0, null]));
        assert_eq!(body["series"][1]["color"], "#22c55e");
        assert_eq!(body["axes"]["x"], "Date");
        assert_eq!(body["style"]["pointRadius"], 2);
    }

    #[tokio::test]
    async fn test_chart_endpoint_shares_error_envelopes() {
        let upstream = StubUpstream::new(500, "text/plain", "boom");
        let response = send(
            state(RelayConfig::with_upstream(UPSTREAM), upstream.clone()),
            Method::GET,
            CHART_PATH,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = send(
            state(RelayConfig::with_upstream(UPSTREAM), upstream),
            Method::POST,
            CHART_PATH,
        )
        .await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health_reports_upstream_configuration() {
        let upstream = StubUpstream::new(200, "application/json", "{}");
        let response = send(state(RelayConfig::default(), upstream.clone()), Method::GET, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["upstream"], "missing");

        let response = send(
            state(RelayConfig::with_upstream(UPSTREAM), upstream.clone()),
            Method::GET,
            "/health",
        )
        .await;
        assert_eq!(body_json(response).await["upstream"], "configured");
        assert_eq!(upstream.calls(), 0);
    }
}
