// tests/tracker/router_tests.rs

#[cfg(test)]
mod tests {

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use bus_tracker::router::create_router;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::fixtures::feeds::siri_feed;
    use crate::fixtures::state::TestState;
    use crate::{StubFeedSource, StubResponse, unreachable_verifier};

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_verify(content_type: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/cap/verify")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn buses_endpoint_returns_vehicles_and_quota() {
        let source = StubFeedSource::new(StubResponse::Feed(siri_feed(2)));
        let app = create_router(TestState::default().build(source));

        let response = app
            .oneshot(get("/api/buses?west=-0.11&south=51.49&east=-0.08&north=51.52"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["vehicles"].as_array().unwrap().len(), 2);
        assert_eq!(body["vehicles"][0]["vehicle_id"], "BUS0");
        assert_eq!(body["vehicles"][0]["destination"], "Victoria");
        assert_eq!(body["vehicle_count"], 0);
        assert!(body["cap_threshold"].is_null());
        assert_eq!(body["rate_remaining"], 299);
        assert_eq!(body["rate_limit"], 300);
    }

    #[tokio::test]
    async fn buses_endpoint_rejects_invalid_bounds() {
        let source = StubFeedSource::new(StubResponse::Feed(siri_feed(1)));
        let app = create_router(TestState::default().build(source.clone()));

        let response = app.oneshot(get("/api/buses?west=abc")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid bounds");
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn buses_endpoint_rejects_repeated_bounds_as_json() {
        let source = StubFeedSource::new(StubResponse::Feed(siri_feed(1)));
        let app = create_router(TestState::default().build(source.clone()));

        let response = app
            .oneshot(get("/api/buses?west=1&west=2&south=0&east=3&north=1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid bounds");
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn buses_endpoint_reports_rate_limit() {
        let source = StubFeedSource::new(StubResponse::Feed(siri_feed(1)));
        let state = TestState {
            max_requests: 1,
            ..Default::default()
        }
        .build(source);
        let app = create_router(state);

        let first = app
            .clone()
            .oneshot(get("/api/buses?west=0&south=0&east=1&north=1"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(get("/api/buses?west=5&south=5&east=6&north=6"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(second.headers()[header::RETRY_AFTER], "3600");
        let body = body_json(second).await;
        assert_eq!(body["error"], "Rate limit exceeded");
        assert_eq!(body["retry_after"], 3600);
    }

    #[tokio::test]
    async fn health_reports_cache_stats() {
        let source = StubFeedSource::new(StubResponse::Feed(siri_feed(1)));
        let state = TestState {
            cache_max: 42,
            ..Default::default()
        }
        .build(source);
        let app = create_router(state);

        app.clone()
            .oneshot(get("/api/buses?west=0&south=0&east=1&north=1"))
            .await
            .unwrap();
        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cache_entries"], 1);
        assert_eq!(body["cache_max"], 42);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn verify_without_cap_issues_session() {
        let source = StubFeedSource::new(StubResponse::Feed(siri_feed(0)));
        let app = create_router(TestState::default().build(source));

        let response = app
            .oneshot(post_verify("application/json", r#"{"token":"anything"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(body["session_token"].is_string());
    }

    #[tokio::test]
    async fn verify_rejects_malformed_body() {
        let source = StubFeedSource::new(StubResponse::Feed(siri_feed(0)));
        let state = TestState::default().build(source);
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(post_verify("application/json", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid request body");

        let response = app
            .oneshot(post_verify("text/plain", "token=anything"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn verify_reports_provider_failure() {
        let source = StubFeedSource::new(StubResponse::Feed(siri_feed(0)));
        let state = TestState {
            verifier: Some(unreachable_verifier()),
            ..Default::default()
        }
        .build(source);
        state.gate.record_served(9);
        let app = create_router(state.clone());

        let response = app
            .oneshot(post_verify("application/json", r#"{"token":"anything"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body.get("session_token").is_none());
        assert!(body["error"].is_string());
        assert_eq!(state.gate.served_count(), 9);
    }
}
